//! The `mechgg history` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use mechgg_core::games;
use mechgg_core::traits::HistoryQuery;

use super::{open, user_facing};

pub async fn execute(
    config_path: Option<PathBuf>,
    game: Option<String>,
    limit: Option<usize>,
    offset: usize,
) -> Result<()> {
    let (config, service) = open(config_path.as_deref()).await?;
    let limit = limit.unwrap_or(config.history_limit);
    anyhow::ensure!(limit >= 1, "limit must be at least 1");

    let query = HistoryQuery {
        game_id: game,
        limit,
        offset,
    };
    let records = service
        .history(&config.user, &query)
        .await
        .map_err(user_facing)?;

    if records.is_empty() {
        println!("No analyses found. Run `mechgg analyze --game <id> --clip <file>` to add one.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Game", "Index", "Habits", "Recorded"]);
    for r in &records {
        let name = games::lookup(&r.game_id).map_or(r.game_id.as_str(), |g| g.name);
        let issues = r.habits.iter().filter(|h| !h.is_positive).count();
        table.add_row(vec![
            Cell::new(r.id),
            Cell::new(name),
            Cell::new(format!("{:.1}", r.composite_index)),
            Cell::new(issues),
            Cell::new(r.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{table}");
    Ok(())
}
