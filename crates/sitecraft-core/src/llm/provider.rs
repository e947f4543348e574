//! LlmProvider trait definition.
//!
//! This is the transport boundary of the pipeline: a single
//! request-in, text-out call that may fail with a provider error.

use sitecraft_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities};

/// Trait for LLM provider backends (Gemini, Anthropic, test doubles).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Retry policy,
/// if any, belongs to the implementation; callers never retry.
///
/// Implementations live in sitecraft-infra (e.g., `GeminiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini", "anthropic").
    fn name(&self) -> &str;

    /// Context and output limits of the configured model.
    fn capabilities(&self) -> &ProviderCapabilities;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
