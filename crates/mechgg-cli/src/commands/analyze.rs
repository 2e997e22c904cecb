//! The `mechgg analyze` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use mechgg_core::games;
use mechgg_core::model::AnalysisRecord;
use mechgg_core::synth::seed_from_size;

use super::{open, user_facing};

pub async fn execute(
    config_path: Option<PathBuf>,
    game: String,
    clip: Option<PathBuf>,
    seed: Option<u32>,
    format: String,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format '{format}', expected text or json"
    );

    let seed = match (clip, seed) {
        (Some(path), None) => {
            let meta = std::fs::metadata(&path)
                .with_context(|| format!("failed to read clip: {}", path.display()))?;
            anyhow::ensure!(meta.is_file(), "clip is not a file: {}", path.display());
            seed_from_size(meta.len())
        }
        (None, Some(seed)) => seed,
        _ => anyhow::bail!("pass exactly one of --clip or --seed"),
    };

    if games::lookup(&game).is_none() {
        eprintln!(
            "Note: unknown game '{game}', scoring as {}",
            games::fallback().name
        );
    }

    let (config, service) = open(config_path.as_deref()).await?;
    let record = service
        .analyze(&config.user, &game, seed)
        .await
        .map_err(user_facing)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
        println!("\nNext: mechgg plan --analysis {}", record.id);
    }

    Ok(())
}

fn print_record(record: &AnalysisRecord) {
    let name = games::lookup(&record.game_id).map_or(record.game_id.as_str(), |g| g.name);
    println!("Analysis {}", record.id);
    println!("Game: {name} ({})", record.category);
    println!("Mechanical Index: {:.1}", record.composite_index);

    let mut scores = Table::new();
    scores.set_header(vec!["Dimension", "Score"]);
    for (dim, score) in record.dimension_scores.ordered(record.category) {
        scores.add_row(vec![Cell::new(dim), Cell::new(format!("{score:.1}"))]);
    }
    println!("\n{scores}");

    if !record.habits.is_empty() {
        let mut habits = Table::new();
        habits.set_header(vec!["Habit", "Severity", "Kind"]);
        for h in &record.habits {
            let kind = if h.is_positive { "strength" } else { "fix" };
            habits.add_row(vec![
                Cell::new(&h.name),
                Cell::new(h.severity),
                Cell::new(kind),
            ]);
        }
        println!("\n{habits}");
    }

    println!("\n{}", record.summary);
}
