//! Type-erased provider handle.
//!
//! [`LlmProvider`] returns `impl Future`, so it cannot be used as a trait
//! object. [`LlmProviderDyn`] boxes the future and is blanket-implemented for
//! every provider; [`BoxLlmProvider`] is the clonable handle the session
//! controller stores and swaps out when credentials change.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use sitecraft_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities};

use super::provider::LlmProvider;

/// Boxed future returned by [`LlmProviderDyn::complete_boxed`].
pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;

/// Object-safe mirror of [`LlmProvider`].
pub trait LlmProviderDyn: Send + Sync {
    fn provider_name(&self) -> &str;

    fn provider_capabilities(&self) -> &ProviderCapabilities;

    fn complete_boxed<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a>;
}

impl<T: LlmProvider> LlmProviderDyn for T {
    fn provider_name(&self) -> &str {
        self.name()
    }

    fn provider_capabilities(&self) -> &ProviderCapabilities {
        self.capabilities()
    }

    fn complete_boxed<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
        Box::pin(self.complete(request))
    }
}

/// Shared, type-erased provider selected at runtime from configuration.
///
/// Cloning is cheap; clones share the same underlying client. A call that
/// holds a clone keeps using it even after the session swaps providers.
#[derive(Clone)]
pub struct BoxLlmProvider {
    inner: Arc<dyn LlmProviderDyn>,
}

impl BoxLlmProvider {
    pub fn new<T: LlmProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Arc::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.provider_name()
    }

    pub fn capabilities(&self) -> &ProviderCapabilities {
        self.inner.provider_capabilities()
    }

    /// Send one completion request.
    pub fn complete<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
        self.inner.complete_boxed(request)
    }
}

impl fmt::Debug for BoxLlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxLlmProvider")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}
