//! Global configuration types for Sitecraft.
//!
//! `GlobalConfig` represents the top-level `config.toml` that selects the
//! model provider and the generation parameters used for every call.

use serde::{Deserialize, Serialize};

use crate::llm::ProviderConfig;

/// Top-level configuration for Sitecraft.
///
/// Loaded from `~/.sitecraft/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Which provider and model to call.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Maximum output tokens per model call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature per model call.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Per-request transport timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Directory exported documents are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_max_tokens() -> u32 {
    8_192
}

fn default_temperature() -> f64 {
    0.7
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
            output_dir: default_output_dir(),
        }
    }
}
