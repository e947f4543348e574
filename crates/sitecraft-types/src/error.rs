use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::LlmError;

/// Transport-layer failure as seen by the session.
///
/// Every provider error collapses into one of these. Only `Auth` changes
/// control flow (credential re-collection); the rest are retryable by the user.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportError {
    #[error("authentication rejected by the model provider")]
    Auth,

    #[error("network error: {message}")]
    Network { message: String },

    #[error("rate limited by the model provider")]
    RateLimit { retry_after_ms: Option<u64> },

    #[error("model request timed out")]
    Timeout,
}

impl TransportError {
    /// Whether the user must supply new credentials before retrying.
    pub fn requires_credentials(&self) -> bool {
        matches!(self, TransportError::Auth)
    }

    /// Short user-facing guidance for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            TransportError::Auth => "Invalid API key. Please check your credentials and try again.",
            TransportError::RateLimit { .. } => {
                "The model provider is rate limiting requests. Please wait a moment and try again."
            }
            TransportError::Timeout => "The model took too long to respond. Please try again.",
            TransportError::Network { .. } => "Failed to reach the model provider. Please try again.",
        }
    }
}

impl From<&LlmError> for TransportError {
    fn from(err: &LlmError) -> Self {
        match err {
            LlmError::AuthenticationFailed => TransportError::Auth,
            LlmError::RateLimited { retry_after_ms } => TransportError::RateLimit {
                retry_after_ms: *retry_after_ms,
            },
            LlmError::Overloaded(_) => TransportError::RateLimit {
                retry_after_ms: None,
            },
            LlmError::Timeout(_) => TransportError::Timeout,
            other => TransportError::Network {
                message: other.to_string(),
            },
        }
    }
}

impl From<LlmError> for TransportError {
    fn from(err: LlmError) -> Self {
        TransportError::from(&err)
    }
}

/// Errors surfaced by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a generation is already in progress for this session")]
    Busy,

    #[error("no website has been generated yet")]
    NoArtifact,

    #[error("{0} must not be empty")]
    EmptyInput(&'static str),

    #[error("operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SessionError {
    /// Whether this failure should trigger credential re-collection.
    pub fn requires_credentials(&self) -> bool {
        matches!(self, SessionError::Transport(t) if t.requires_credentials())
    }
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing API key: set the {0} environment variable")]
    MissingApiKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_classification() {
        assert_eq!(
            TransportError::from(LlmError::AuthenticationFailed),
            TransportError::Auth
        );
        assert_eq!(
            TransportError::from(LlmError::RateLimited {
                retry_after_ms: Some(2000)
            }),
            TransportError::RateLimit {
                retry_after_ms: Some(2000)
            }
        );
        assert_eq!(TransportError::from(LlmError::Timeout(30)), TransportError::Timeout);
        assert!(matches!(
            TransportError::from(LlmError::Provider {
                message: "connection reset".to_string()
            }),
            TransportError::Network { message } if message.contains("connection reset")
        ));
    }

    #[test]
    fn test_only_auth_requires_credentials() {
        assert!(TransportError::Auth.requires_credentials());
        assert!(!TransportError::Timeout.requires_credentials());
        assert!(SessionError::Transport(TransportError::Auth).requires_credentials());
        assert!(!SessionError::Busy.requires_credentials());
    }

    #[test]
    fn test_user_messages_distinguish_auth() {
        assert!(TransportError::Auth.user_message().contains("credentials"));
        assert!(
            TransportError::Network {
                message: "x".to_string()
            }
            .user_message()
            .contains("try again")
        );
    }

    #[test]
    fn test_config_error_names_variable() {
        let err = ConfigError::MissingApiKey("GEMINI_API_KEY".to_string());
        assert_eq!(
            err.to_string(),
            "missing API key: set the GEMINI_API_KEY environment variable"
        );
    }

    #[test]
    fn test_session_error_display() {
        assert_eq!(
            SessionError::EmptyInput("description").to_string(),
            "description must not be empty"
        );
        assert_eq!(
            SessionError::Transport(TransportError::Timeout).to_string(),
            "model request timed out"
        );
    }
}
