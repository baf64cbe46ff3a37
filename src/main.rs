//! configkit: demo service showing the loader end to end
//!
//! Loads `config.yaml` (or `--config`, or `CONFIGKIT_CONFIG`), applies
//! `CONFIGKIT_*` overrides and prints the effective config as YAML.

use anyhow::{Context, Result};
use configkit::{json_version_printer, plain_version_printer, LoadResult, Loader, ServiceConfig};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    port: u16,
    log_level: String,
    db: DbConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct DbConfig {
    url: String,
    pool_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            log_level: "info".to_string(),
            db: DbConfig { url: String::new(), pool_size: 4 },
        }
    }
}

impl ServiceConfig for Config {}

fn main() -> Result<()> {
    // RUST_LOG always takes precedence; otherwise only warnings reach stderr.
    let filter = EnvFilter::from_default_env().add_directive(Level::WARN.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let loader = Loader::new(
        "configkit",
        "A configkit demo service",
        "Loads config.yaml, applies CONFIGKIT_* environment overrides and prints the result.",
        "config.yaml",
        "CONFIGKIT",
    );

    let mut cfg = Config::default();
    let mut stdout = std::io::stdout().lock();
    let version = env!("CARGO_PKG_VERSION");
    let result = match option_env!("CONFIGKIT_BUILD_COMMIT") {
        Some(commit) => loader.load(
            &mut cfg,
            json_version_printer(
                version,
                commit,
                option_env!("CONFIGKIT_BUILD_DATE").unwrap_or(""),
            ),
            &mut stdout,
        ),
        None => loader.load(&mut cfg, plain_version_printer(version), &mut stdout),
    }?;
    if result == LoadResult::Stop {
        return Ok(());
    }

    tracing::info!(port = cfg.port, log_level = %cfg.log_level, "config loaded");
    let db = cfg.sub_config("db")?;
    tracing::debug!(keys = db.len(), "db section");

    let rendered = serde_yaml::to_string(&cfg).context("render config")?;
    stdout.write_all(rendered.as_bytes()).context("write config")?;
    Ok(())
}
