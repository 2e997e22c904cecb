//! The `mechgg stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::{open, user_facing};

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (config, service) = open(config_path.as_deref()).await?;
    let stats = service
        .dashboard(&config.user)
        .await
        .map_err(user_facing)?;

    println!("Total analyses: {}", stats.total_analyses);
    let (Some(best), Some(avg)) = (stats.best_index, stats.average_index) else {
        println!("No analyses yet.");
        return Ok(());
    };
    println!("Best index: {best:.1}");
    println!("Average index: {avg:.1}");

    let mut by_game = Table::new();
    by_game.set_header(vec!["Game", "Clips", "Avg index"]);
    for g in &stats.by_game {
        by_game.add_row(vec![
            Cell::new(format!("{} {}", g.cover_emoji, g.name)),
            Cell::new(g.clip_count),
            Cell::new(format!("{:.1}", g.average_index)),
        ]);
    }
    println!("\n{by_game}");

    let mut recent = Table::new();
    recent.set_header(vec!["Recorded", "Game", "Index"]);
    for p in &stats.recent {
        recent.add_row(vec![
            Cell::new(p.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&p.game_name),
            Cell::new(format!("{:.1}", p.composite_index)),
        ]);
    }
    println!("\n{recent}");
    Ok(())
}
