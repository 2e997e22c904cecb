//! The `mechgg plan` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use uuid::Uuid;

use super::{open, user_facing};

pub async fn execute(config_path: Option<PathBuf>, analysis_id: Uuid, format: String) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format '{format}', expected text or json"
    );

    let (config, service) = open(config_path.as_deref()).await?;
    let view = service
        .plan(&config.user, analysis_id)
        .await
        .map_err(user_facing)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let plan = &view.plan.plan;
    println!("Plan {}", view.plan.id);
    println!(
        "{} weeks, {} daily, {} of {} drills done",
        plan.total_weeks,
        plan.estimated_daily_time,
        view.completed.len(),
        plan.drill_count()
    );
    if !plan.target_habits.is_empty() {
        println!("Targets: {}", plan.target_habits.join(", "));
    }

    for week in &plan.weeks {
        println!("\nWeek {}: {}", week.week, week.focus);
        println!("{} ({})", week.theme, week.daily_time);

        let mut table = Table::new();
        table.set_header(vec!["", "Drill", "Name", "Duration", "Frequency", "Level"]);
        for d in &week.drills {
            let done = if view.completed.contains(&d.id) { "x" } else { "" };
            table.add_row(vec![
                Cell::new(done),
                Cell::new(&d.id),
                Cell::new(&d.name),
                Cell::new(&d.duration),
                Cell::new(&d.frequency),
                Cell::new(d.difficulty),
            ]);
        }
        println!("{table}");
        println!("Goal: {}", week.goal);
    }

    println!(
        "\nMark drills with: mechgg complete --plan {} --drill <id>",
        view.plan.id
    );
    Ok(())
}
