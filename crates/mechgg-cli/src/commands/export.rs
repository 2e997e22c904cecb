//! The `mechgg export` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use uuid::Uuid;

use super::{open, user_facing};

pub async fn execute(
    config_path: Option<PathBuf>,
    analysis_id: Uuid,
    output: PathBuf,
    format: String,
) -> Result<()> {
    let (config, service) = open(config_path.as_deref()).await?;
    let report = service
        .report(&config.user, analysis_id)
        .await
        .map_err(user_facing)?;

    match format.as_str() {
        "json" => report.save_json(&output)?,
        "markdown" | "md" => {
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output, report.to_markdown())
                .with_context(|| format!("failed to write report to {}", output.display()))?;
        }
        other => anyhow::bail!("unknown format '{other}', expected json or md"),
    }

    println!("Report written to {}", output.display());
    Ok(())
}
