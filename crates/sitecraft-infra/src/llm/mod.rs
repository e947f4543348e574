//! LLM provider implementations.
//!
//! Contains concrete implementations of the [`LlmProvider`] trait defined in
//! `sitecraft-core` (Gemini and Anthropic), and a provider factory
//! ([`create_provider`]) that builds the configured one.
//!
//! [`LlmProvider`]: sitecraft_core::llm::provider::LlmProvider

pub mod anthropic;
pub mod gemini;

use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use secrecy::{ExposeSecret, SecretString};

use sitecraft_core::llm::box_provider::BoxLlmProvider;
use sitecraft_types::llm::{LlmError, ProviderConfig, ProviderType};

use self::anthropic::AnthropicProvider;
use self::gemini::GeminiProvider;

/// Create a [`BoxLlmProvider`] from a [`ProviderConfig`].
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] when no API key is available,
/// so callers take the same credential path as for a rejected key.
pub fn create_provider(
    config: &ProviderConfig,
    api_key: Option<&SecretString>,
    timeout: Duration,
) -> Result<BoxLlmProvider, LlmError> {
    let key = api_key
        .map(|k| SecretString::from(k.expose_secret().to_string()))
        .ok_or(LlmError::AuthenticationFailed)?;

    match config.provider_type {
        ProviderType::Gemini => {
            let mut provider = GeminiProvider::new(key, config.model.clone(), timeout)?;
            if let Some(base_url) = &config.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Ok(BoxLlmProvider::new(provider))
        }
        ProviderType::Anthropic => {
            let mut provider = AnthropicProvider::new(key, config.model.clone(), timeout)?;
            if let Some(base_url) = &config.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Ok(BoxLlmProvider::new(provider))
        }
    }
}

/// Parse a `Retry-After` header given in whole seconds.
///
/// Values too large to express in milliseconds are dropped.
pub(crate) fn retry_after_ms(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .and_then(|secs| secs.checked_mul(1_000))
}
