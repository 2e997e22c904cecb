//! The `mechgg delete` command.

use std::path::PathBuf;

use anyhow::Result;
use uuid::Uuid;

use super::{open, user_facing};

pub async fn execute(config_path: Option<PathBuf>, analysis_id: Uuid) -> Result<()> {
    let (config, service) = open(config_path.as_deref()).await?;
    service
        .delete(&config.user, analysis_id)
        .await
        .map_err(user_facing)?;
    println!("Deleted analysis {analysis_id} and its drill plan");
    Ok(())
}
