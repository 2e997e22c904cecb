//! Subcommand implementations.

use std::path::Path;

use anyhow::Result;

use mechgg_core::engine::CoachService;
use mechgg_core::error::CoachError;
use mechgg_store::{create_service, load_config_from, MechggConfig};

pub mod analyze;
pub mod complete;
pub mod delete;
pub mod export;
pub mod games;
pub mod history;
pub mod init;
pub mod plan;
pub mod stats;

/// Load config and open the configured store.
pub async fn open(config_path: Option<&Path>) -> Result<(MechggConfig, CoachService)> {
    let config = load_config_from(config_path)?;
    let service = create_service(&config).await?;
    Ok((config, service))
}

/// Turn a service error into a message fit for the terminal.
pub fn user_facing(err: CoachError) -> anyhow::Error {
    if let CoachError::Storage(inner) = &err {
        tracing::error!(error = %inner, "storage failure");
    }
    anyhow::anyhow!(err.public_message())
}
