//! mechgg-store — Storage backends, quota tiers and configuration.
//!
//! Implements the `AnalysisStore` and `QuotaGate` traits from `mechgg-core`
//! in memory and as a single JSON file, and builds a configured
//! `CoachService` from `mechgg.toml`.

pub mod config;
pub mod json;
pub mod memory;
pub mod quota;
pub mod state;

pub use config::{create_service, load_config, load_config_from, MechggConfig, StoreConfig};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use quota::Tier;
