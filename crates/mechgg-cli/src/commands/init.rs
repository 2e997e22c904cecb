//! The `mechgg init` command.

use std::path::Path;

use anyhow::{Context, Result};

use mechgg_store::MechggConfig;

pub fn execute() -> Result<()> {
    let path = Path::new("mechgg.toml");
    if path.exists() {
        println!("mechgg.toml already exists, skipping.");
    } else {
        let body = MechggConfig::default().to_toml()?;
        std::fs::write(path, format!("{HEADER}{body}"))
            .context("failed to write mechgg.toml")?;
        println!("Created mechgg.toml");
    }

    println!("\nNext steps:");
    println!("  1. Set your tier in mechgg.toml (free, starter, pro, coach, team)");
    println!("  2. Run: mechgg games");
    println!("  3. Run: mechgg analyze --game valorant --clip <file>");

    Ok(())
}

const HEADER: &str = "# mechgg configuration
#
# String values may reference environment variables as ${VAR}.
# MECHGG_USER and MECHGG_STORE override `user` and the JSON store path.

";
