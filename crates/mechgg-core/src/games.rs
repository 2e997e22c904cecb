//! Static game registry and category resolution.

use serde::Serialize;

use crate::model::{Category, Style};

/// A supported game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub style: Style,
    pub cover_emoji: &'static str,
}

const fn game(
    id: &'static str,
    name: &'static str,
    category: Category,
    style: Style,
    cover_emoji: &'static str,
) -> GameProfile {
    GameProfile {
        id,
        name,
        category,
        style,
        cover_emoji,
    }
}

/// Id of the entry unknown games resolve to.
pub const FALLBACK_GAME_ID: &str = "other";

/// Every supported game.
pub static GAMES: &[GameProfile] = &[
    game("valorant", "Valorant", Category::Fps, Style::Tactical, "🎯"),
    game("csgo", "CS2", Category::Fps, Style::Tactical, "🎯"),
    game("r6siege", "Rainbow Six Siege", Category::Fps, Style::Tactical, "🎯"),
    game("arcraiders", "Arc Raiders", Category::Fps, Style::Extraction, "🎯"),
    game("apex", "Apex Legends", Category::Fps, Style::BattleRoyale, "🎯"),
    game("fortnite", "Fortnite", Category::Fps, Style::BattleRoyale, "🎯"),
    game("warzone", "Warzone", Category::Fps, Style::BattleRoyale, "🎯"),
    game("overwatch2", "Overwatch 2", Category::Fps, Style::Hero, "🎯"),
    game("f1", "F1", Category::Racing, Style::Sim, "🏎️"),
    game("gt7", "Gran Turismo 7", Category::Racing, Style::Sim, "🏎️"),
    game("forzamotorsport", "Forza Motorsport", Category::Racing, Style::Sim, "🏎️"),
    game("forzahorizon", "Forza Horizon", Category::Racing, Style::Arcade, "🏎️"),
    game("mariokart", "Mario Kart", Category::Racing, Style::Arcade, "🏎️"),
    game("dirtally", "Dirt Rally", Category::Racing, Style::Rally, "🏎️"),
    game("fifa", "EA FC / FIFA", Category::Sports, Style::Football, "⚽"),
    game("nba2k", "NBA 2K", Category::Sports, Style::Basketball, "🏀"),
    game("madden", "Madden", Category::Sports, Style::Football, "🏈"),
    game("nhl", "EA NHL", Category::Sports, Style::Hockey, "🏒"),
    game("mlbtheshow", "MLB The Show", Category::Sports, Style::Baseball, "⚾"),
    game("starcraft2", "StarCraft II", Category::Strategy, Style::Rts, "⚔️"),
    game("aoe4", "Age of Empires IV", Category::Strategy, Style::Rts, "⚔️"),
    game("leagueoflegends", "League of Legends", Category::Strategy, Style::Moba, "⚔️"),
    game("dota2", "Dota 2", Category::Strategy, Style::Moba, "⚔️"),
    game("sf6", "Street Fighter 6", Category::Fighting, Style::Traditional, "👊"),
    game("tekken8", "Tekken 8", Category::Fighting, Style::Traditional, "👊"),
    game("mortalkombat", "Mortal Kombat", Category::Fighting, Style::Traditional, "👊"),
    game("smashbros", "Super Smash Bros.", Category::Fighting, Style::Platform, "👊"),
    game(FALLBACK_GAME_ID, "Other", Category::Fps, Style::Tactical, "🎮"),
];

/// Look up a game by exact id.
pub fn lookup(game_id: &str) -> Option<&'static GameProfile> {
    GAMES.iter().find(|g| g.id == game_id)
}

/// The profile unknown ids resolve to.
pub fn fallback() -> &'static GameProfile {
    // The registry always carries the fallback entry; the literal keeps this total.
    lookup(FALLBACK_GAME_ID).unwrap_or(&FALLBACK)
}

static FALLBACK: GameProfile = game(FALLBACK_GAME_ID, "Other", Category::Fps, Style::Tactical, "🎮");

/// Resolve a game id to its category and style. Never fails.
pub fn resolve(game_id: &str) -> (Category, Style) {
    let profile = match lookup(game_id) {
        Some(p) => p,
        None => {
            tracing::debug!("unknown game id '{game_id}', using fallback profile");
            fallback()
        }
    };
    (profile.category, profile.style)
}

/// Registry entries sorted by display name, optionally filtered by category.
pub fn list(category: Option<Category>) -> Vec<&'static GameProfile> {
    let mut games: Vec<&'static GameProfile> = GAMES
        .iter()
        .filter(|g| category.is_none_or(|c| g.category == c))
        .collect();
    games.sort_by(|a, b| a.name.cmp(b.name));
    games
}

/// Distinct categories present in the registry.
pub fn categories() -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|c| GAMES.iter().any(|g| g.category == *c))
        .collect()
}
