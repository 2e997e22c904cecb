//! Configuration loading and service factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mechgg_core::engine::CoachService;

use crate::json::JsonFileStore;
use crate::memory::MemoryStore;
use crate::quota::Tier;

/// Where analyses are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Lost when the process exits.
    Memory,
    Json {
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Json {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./mechgg-data/store.json")
}

/// Top-level mechgg configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechggConfig {
    /// User id analyses are recorded under.
    #[serde(default = "default_user")]
    pub user: String,
    /// Subscription tier, sets the monthly analysis limit.
    #[serde(default)]
    pub tier: Tier,
    /// Default page size for history.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default)]
    pub store: StoreConfig,
}

fn default_user() -> String {
    "local".to_string()
}
fn default_history_limit() -> usize {
    20
}

impl Default for MechggConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            tier: Tier::default(),
            history_limit: default_history_limit(),
            store: StoreConfig::default(),
        }
    }
}

impl MechggConfig {
    /// Render as TOML, e.g. for `mechgg init`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config")
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mechgg.toml` in the current directory
/// 2. `~/.config/mechgg/config.toml`
///
/// Environment variable overrides: `MECHGG_USER`, `MECHGG_STORE` (JSON store path).
pub fn load_config() -> Result<MechggConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MechggConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mechgg.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            toml::from_str::<MechggConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MechggConfig::default(),
    };

    // Apply env var overrides
    if let Ok(user) = std::env::var("MECHGG_USER") {
        config.user = user;
    }
    if let Ok(store) = std::env::var("MECHGG_STORE") {
        config.store = StoreConfig::Json {
            path: PathBuf::from(store),
        };
    }

    config.user = resolve_env_vars(&config.user);
    if let StoreConfig::Json { path } = &mut config.store {
        *path = PathBuf::from(resolve_env_vars(&path.to_string_lossy()));
    }

    anyhow::ensure!(!config.user.trim().is_empty(), "config: user must not be empty");
    anyhow::ensure!(config.history_limit > 0, "config: history_limit must be positive");

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mechgg"))
}

/// Build a coaching service backed by the configured store.
pub async fn create_service(config: &MechggConfig) -> Result<CoachService> {
    match &config.store {
        StoreConfig::Memory => {
            let store = Arc::new(MemoryStore::new(config.tier));
            Ok(CoachService::new(store.clone(), store))
        }
        StoreConfig::Json { path } => {
            let store = JsonFileStore::open(path, config.tier)
                .await
                .with_context(|| format!("failed to open store: {}", path.display()))?;
            let store = Arc::new(store);
            Ok(CoachService::new(store.clone(), store))
        }
    }
}
