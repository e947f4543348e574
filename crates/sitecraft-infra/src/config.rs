//! Global configuration loader for Sitecraft.
//!
//! Reads `config.toml` from the data directory (`~/.sitecraft/` by default)
//! and deserializes it into [`GlobalConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sitecraft_types::config::GlobalConfig;

/// Minimum per-request timeout (safety floor).
const MIN_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `SITECRAFT_HOME` environment variable
/// 2. `~/.sitecraft`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SITECRAFT_HOME") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".sitecraft");
    }

    // Last resort: current directory
    PathBuf::from(".sitecraft")
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and returns the default.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Per-request transport timeout with the floor applied.
pub fn request_timeout(config: &GlobalConfig) -> Duration {
    Duration::from_secs(config.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS))
}
