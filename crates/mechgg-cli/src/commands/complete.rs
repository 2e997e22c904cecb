//! The `mechgg complete` command.

use std::path::PathBuf;

use anyhow::Result;
use uuid::Uuid;

use super::{open, user_facing};

pub async fn execute(config_path: Option<PathBuf>, plan_id: Uuid, drill: String) -> Result<()> {
    let (config, service) = open(config_path.as_deref()).await?;
    let completed = service
        .toggle_drill(&config.user, plan_id, &drill)
        .await
        .map_err(user_facing)?;

    let state = if completed.contains(&drill) {
        "completed"
    } else {
        "not completed"
    };
    println!(
        "Drill {drill} marked {state} ({} done in this plan)",
        completed.len()
    );
    Ok(())
}
