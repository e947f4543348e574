//! API key resolution from the environment.
//!
//! Keys are read once per session start from the variable named in
//! [`ProviderConfig::api_key_env`] and wrapped in [`SecretString`] immediately.
//! Blank values and the `YOUR_..._API_KEY` placeholder count as missing.

use secrecy::SecretString;

use sitecraft_types::error::ConfigError;
use sitecraft_types::llm::ProviderConfig;

/// Read the provider's API key from its environment variable.
pub fn resolve_api_key(config: &ProviderConfig) -> Option<SecretString> {
    let value = match std::env::var(&config.api_key_env) {
        Ok(value) => value,
        Err(std::env::VarError::NotPresent) => return None,
        Err(std::env::VarError::NotUnicode(_)) => {
            tracing::warn!(var = %config.api_key_env, "API key variable is not valid unicode, ignoring");
            return None;
        }
    };

    sanitize_key(&value).map(|k| SecretString::from(k.to_string()))
}

/// Like [`resolve_api_key`], but a missing key is an error naming the variable.
pub fn require_api_key(config: &ProviderConfig) -> Result<SecretString, ConfigError> {
    resolve_api_key(config).ok_or_else(|| ConfigError::MissingApiKey(config.api_key_env.clone()))
}

/// Trim a user-supplied key, rejecting blanks and placeholders.
pub fn sanitize_key(raw: &str) -> Option<&str> {
    let key = raw.trim();
    let placeholder = key.starts_with("YOUR_") && key.ends_with("_API_KEY");
    (!key.is_empty() && !placeholder).then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn config(var: &str) -> ProviderConfig {
        ProviderConfig {
            api_key_env: var.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("  AIza-123  "), Some("AIza-123"));
        assert_eq!(sanitize_key("   "), None);
        assert_eq!(sanitize_key("YOUR_GEMINI_API_KEY"), None);
    }

    #[test]
    fn test_resolve_api_key_from_env() {
        // SAFETY: Each test uses its own variable name.
        unsafe {
            std::env::set_var("SITECRAFT_TEST_KEY_PRESENT", "secret-value");
        }
        let key = resolve_api_key(&config("SITECRAFT_TEST_KEY_PRESENT")).unwrap();
        assert_eq!(key.expose_secret(), "secret-value");
        unsafe {
            std::env::remove_var("SITECRAFT_TEST_KEY_PRESENT");
        }
    }

    #[test]
    fn test_missing_key_names_variable() {
        let err = require_api_key(&config("SITECRAFT_TEST_KEY_ABSENT")).unwrap_err();
        assert!(err.to_string().contains("SITECRAFT_TEST_KEY_ABSENT"));
    }

    #[test]
    fn test_placeholder_key_is_missing() {
        // SAFETY: Each test uses its own variable name.
        unsafe {
            std::env::set_var("SITECRAFT_TEST_KEY_PLACEHOLDER", "YOUR_GEMINI_API_KEY");
        }
        assert!(resolve_api_key(&config("SITECRAFT_TEST_KEY_PLACEHOLDER")).is_none());
        unsafe {
            std::env::remove_var("SITECRAFT_TEST_KEY_PLACEHOLDER");
        }
    }
}
