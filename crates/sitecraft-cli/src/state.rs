//! Application state shared by every command.
//!
//! Holds the resolved data directory and `config.toml` contents, and builds
//! providers and session controllers from them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use secrecy::SecretString;

use sitecraft_core::llm::box_provider::BoxLlmProvider;
use sitecraft_core::session::controller::{GenerationOptions, SessionController};
use sitecraft_infra::config::{load_global_config, request_timeout, resolve_data_dir};
use sitecraft_infra::llm::create_provider;
use sitecraft_infra::secret::require_api_key;
use sitecraft_types::config::GlobalConfig;

pub struct AppState {
    pub data_dir: PathBuf,
    pub config: GlobalConfig,
}

impl AppState {
    /// Resolve the data directory and load its configuration.
    pub async fn load() -> Self {
        let data_dir = resolve_data_dir();
        let config = load_global_config(&data_dir).await;
        tracing::debug!(
            data_dir = %data_dir.display(),
            provider = %config.provider.provider_type,
            model = %config.provider.model,
            "configuration loaded"
        );
        Self { data_dir, config }
    }

    /// Name of the environment variable the API key is read from.
    pub fn api_key_env(&self) -> &str {
        &self.config.provider.api_key_env
    }

    /// Build the configured provider around `key`.
    pub fn provider(&self, key: &SecretString) -> Result<BoxLlmProvider> {
        create_provider(&self.config.provider, Some(key), request_timeout(&self.config))
            .context("Failed to create LLM provider")
    }

    /// Start a session with the key from the environment.
    ///
    /// Fails with a message naming the variable when no key is set.
    pub fn controller(&self) -> Result<SessionController> {
        let key = require_api_key(&self.config.provider)?;
        self.controller_with_key(&key)
    }

    pub fn controller_with_key(&self, key: &SecretString) -> Result<SessionController> {
        Ok(SessionController::new(
            self.provider(key)?,
            GenerationOptions::from_config(&self.config),
        ))
    }

    /// Export directory: the explicit `--out` if given, else `output_dir` from config.
    pub fn output_dir(&self, out: Option<PathBuf>) -> PathBuf {
        out.unwrap_or_else(|| PathBuf::from(&self.config.output_dir))
    }
}
