//! GeminiProvider -- concrete [`LlmProvider`] implementation for Google Gemini.
//!
//! Sends requests to the Generative Language API
//! (`/v1beta/models/{model}:generateContent`) with the API key in the
//! `x-goog-api-key` header.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use sitecraft_core::llm::provider::LlmProvider;
use sitecraft_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, ProviderCapabilities,
    StopReason, Usage,
};

use crate::llm::retry_after_ms;

use super::types::{
    GeminiContent, GeminiErrorEnvelope, GeminiPart, GeminiRequest, GeminiResponse,
    GenerationConfig,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini LLM provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    timeout: Duration,
    capabilities: ProviderCapabilities,
}

impl GeminiProvider {
    /// Create a new Gemini provider with a per-request timeout.
    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        let capabilities = Self::capabilities_for_model(&model);

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            timeout,
            capabilities,
        })
    }

    /// The default model for this provider.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn capabilities_for_model(model: &str) -> ProviderCapabilities {
        if model.contains("pro") {
            ProviderCapabilities {
                max_context_tokens: 2_097_152,
                max_output_tokens: 65_536,
            }
        } else {
            ProviderCapabilities {
                max_context_tokens: 1_048_576,
                max_output_tokens: 8_192,
            }
        }
    }

    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }

    fn to_gemini_request(request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|m| GeminiContent {
                role: Some(match m.role {
                    MessageRole::User => "user".to_string(),
                    MessageRole::Assistant => "model".to_string(),
                }),
                parts: vec![GeminiPart {
                    text: Some(m.content.clone()),
                }],
            })
            .collect();

        GeminiRequest {
            contents,
            system_instruction: request.system.as_ref().map(|s| GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: Some(s.clone()),
                }],
            }),
            generation_config: GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            },
        }
    }

    /// Map a non-success HTTP status to an [`LlmError`].
    ///
    /// Gemini reports a bad key as 400 `INVALID_ARGUMENT` with an `API_KEY_INVALID`
    /// reason, so the body is inspected as well as the status.
    fn error_for_status(status: u16, body: &str, retry_after_ms: Option<u64>) -> LlmError {
        match status {
            401 | 403 => LlmError::AuthenticationFailed,
            400 if body.contains("API_KEY") || body.contains("API key not valid") => {
                LlmError::AuthenticationFailed
            }
            429 => LlmError::RateLimited { retry_after_ms },
            503 => LlmError::Overloaded(body.to_string()),
            _ => {
                let message = serde_json::from_str::<GeminiErrorEnvelope>(body)
                    .map(|env| format!("HTTP {status} {}: {}", env.error.status, env.error.message))
                    .unwrap_or_else(|_| format!("HTTP {status}: {body}"));
                LlmError::Provider { message }
            }
        }
    }
}

// GeminiProvider does NOT derive Debug; see AnthropicProvider.

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };
        let body = Self::to_gemini_request(request);

        let response = self
            .client
            .post(self.url(model))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout.as_secs())
                } else {
                    LlmError::Provider {
                        message: format!("HTTP request failed: {e}"),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_ms = retry_after_ms(&response);
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::error_for_status(status.as_u16(), &error_body, retry_after_ms));
        }

        let gemini_resp: GeminiResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.timeout.as_secs())
            } else {
                LlmError::Deserialization(format!("failed to parse response: {e}"))
            }
        })?;

        let candidate = gemini_resp.candidates.first();
        let content = candidate.map(|c| c.text()).unwrap_or_default();
        let stop_reason = match candidate {
            // No candidate at all means the prompt itself was blocked.
            None => StopReason::ContentFilter,
            Some(c) => c
                .finish_reason
                .as_deref()
                .and_then(|r| r.parse().ok())
                .unwrap_or(StopReason::EndTurn),
        };
        let usage = gemini_resp.usage_metadata.unwrap_or_default();

        Ok(CompletionResponse {
            id: gemini_resp.response_id.unwrap_or_default(),
            content,
            model: gemini_resp.model_version.unwrap_or_else(|| model.to_string()),
            stop_reason,
            usage: Usage {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage.candidates_token_count,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sitecraft_types::llm::Message;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    fn provider(server: &MockServer) -> GeminiProvider {
        GeminiProvider::new(
            SecretString::from("test-key".to_string()),
            "gemini-2.0-flash".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(server.uri())
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gemini-2.0-flash".to_string(),
            messages: vec![Message::user("a bakery website")],
            system: None,
            max_tokens: 8192,
            temperature: Some(0.7),
        }
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "a bakery website"}]}],
                "generationConfig": {"maxOutputTokens": 8192}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "{\"html\":\"<p>hi</p>\"}"}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5},
                "modelVersion": "gemini-2.0-flash-001",
                "responseId": "resp-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = provider(&server).complete(&request()).await.unwrap();
        assert_eq!(resp.content, r#"{"html":"<p>hi</p>"}"#);
        assert_eq!(resp.id, "resp-1");
        assert_eq!(resp.model, "gemini-2.0-flash-001");
        assert_eq!(resp.stop_reason, StopReason::EndTurn);
        assert_eq!(resp.usage.input_tokens, 10);
        assert_eq!(resp.usage.output_tokens, 5);
    }

    #[tokio::test]
    async fn test_invalid_key_400_is_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT",
                    "details": [{"reason": "API_KEY_INVALID"}]
                }
            })))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_403_is_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_429_carries_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("retry-after", "7")
                    .set_body_string("quota exceeded"),
            )
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            LlmError::RateLimited {
                retry_after_ms: Some(7_000)
            }
        ));
    }

    #[tokio::test]
    async fn test_429_with_oversized_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("retry-after", "18446744073709551615")
                    .set_body_string("quota exceeded"),
            )
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            LlmError::RateLimited {
                retry_after_ms: None
            }
        ));
    }

    #[tokio::test]
    async fn test_503_is_overloaded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model overloaded"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Overloaded(body) if body.contains("overloaded")));
    }

    #[tokio::test]
    async fn test_other_400_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "bad temperature", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        match err {
            LlmError::Provider { message } => {
                assert!(message.contains("INVALID_ARGUMENT"));
                assert!(message.contains("bad temperature"));
            }
            other => panic!("expected Provider error, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(3))
                    .set_body_json(json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let provider = GeminiProvider::new(
            SecretString::from("test-key".to_string()),
            "gemini-2.0-flash".to_string(),
            Duration::from_millis(200),
        )
        .unwrap()
        .with_base_url(server.uri());

        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_blocked_prompt_yields_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let resp = provider(&server).complete(&request()).await.unwrap();
        assert_eq!(resp.content, "");
        assert_eq!(resp.stop_reason, StopReason::ContentFilter);
    }

    #[test]
    fn test_system_prompt_becomes_system_instruction() {
        let mut req = request();
        req.system = Some("Be brief.".to_string());
        let body = serde_json::to_value(GeminiProvider::to_gemini_request(&req)).unwrap();
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be brief.");
        assert!(body["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_capabilities() {
        let caps = GeminiProvider::capabilities_for_model("gemini-2.5-pro");
        assert_eq!(caps.max_output_tokens, 65_536);
        let caps = GeminiProvider::capabilities_for_model("gemini-2.0-flash");
        assert_eq!(caps.max_output_tokens, 8_192);
    }
}
