//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use greetbus_core::error::{GreetBusError, Result};

pub use schema::{GatewayConfig, GatewaySection, MetricsSection, WorkerSection};

/// Looked up in the working directory at start-up.
pub const DEFAULT_CONFIG_PATH: &str = "greetbus.yaml";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| GreetBusError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| GreetBusError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `path` when it exists, built-in defaults otherwise.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    if path.exists() {
        tracing::info!(path = %path.display(), "loading config");
        load_from_file(path)
    } else {
        tracing::info!(path = %path.display(), "config file not found, using defaults");
        Ok(GatewayConfig::default())
    }
}
