//! Dashboard statistics over a user's analysis history.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::games;
use crate::model::AnalysisRecord;
use crate::synth::round1;

/// Games shown in the per-game breakdown.
pub const TOP_GAMES: usize = 6;

/// Points in the recent trend.
pub const TREND_POINTS: usize = 10;

/// Aggregate statistics for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_analyses: usize,
    /// `None` when the user has no analyses.
    pub best_index: Option<f64>,
    pub average_index: Option<f64>,
    /// Most analyzed games, most clips first.
    pub by_game: Vec<GameStats>,
    /// Latest analyses, newest first.
    pub recent: Vec<TrendPoint>,
}

/// Per-game counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub game_id: String,
    pub name: String,
    pub cover_emoji: String,
    pub clip_count: usize,
    pub average_index: f64,
}

/// One analysis in the recent trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub analysis_id: Uuid,
    pub game_name: String,
    pub composite_index: f64,
    pub created_at: DateTime<Utc>,
}

/// Display name for a stored game id. Unknown ids show as-is.
fn game_name(game_id: &str) -> String {
    games::lookup(game_id)
        .map(|g| g.name.to_string())
        .unwrap_or_else(|| game_id.to_string())
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| round1(sum / n as f64))
}

/// Compute dashboard statistics. Record order does not matter.
pub fn compute_dashboard(records: &[AnalysisRecord]) -> DashboardStats {
    let best_index = records
        .iter()
        .map(|r| r.composite_index)
        .reduce(f64::max);
    let average_index = mean(records.iter().map(|r| r.composite_index));

    let mut grouped: HashMap<&str, Vec<f64>> = HashMap::new();
    for r in records {
        grouped
            .entry(r.game_id.as_str())
            .or_default()
            .push(r.composite_index);
    }
    let mut by_game: Vec<GameStats> = grouped
        .into_iter()
        .map(|(game_id, indices)| {
            let profile = games::lookup(game_id);
            GameStats {
                game_id: game_id.to_string(),
                name: game_name(game_id),
                cover_emoji: profile
                    .unwrap_or_else(games::fallback)
                    .cover_emoji
                    .to_string(),
                clip_count: indices.len(),
                average_index: mean(indices.into_iter()).unwrap_or(0.0),
            }
        })
        .collect();
    // Ties break on id so output is stable.
    by_game.sort_by(|a, b| {
        b.clip_count
            .cmp(&a.clip_count)
            .then_with(|| a.game_id.cmp(&b.game_id))
    });
    by_game.truncate(TOP_GAMES);

    let mut newest: Vec<&AnalysisRecord> = records.iter().collect();
    newest.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let recent = newest
        .into_iter()
        .take(TREND_POINTS)
        .map(|r| TrendPoint {
            analysis_id: r.id,
            game_name: game_name(&r.game_id),
            composite_index: r.composite_index,
            created_at: r.created_at,
        })
        .collect();

    DashboardStats {
        total_analyses: records.len(),
        best_index,
        average_index,
        by_game,
        recent,
    }
}
