//! Session controller for website generation.
//!
//! `SessionController` owns the session's [`SessionState`] and sequences one
//! operation at a time: compose a prompt, call the model through the injected
//! provider, resolve the reply into an artifact, and transition state.
//!
//! Overlapping operations are rejected with [`SessionError::Busy`]. An
//! operation that is cancelled (or whose future is dropped) restores the state
//! it started from.

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use sitecraft_types::artifact::{ComponentArtifact, WebsiteArtifact};
use sitecraft_types::config::GlobalConfig;
use sitecraft_types::error::{SessionError, TransportError};
use sitecraft_types::llm::{CompletionRequest, Message};
use sitecraft_types::session::{GenerationOutcome, ImprovementOutcome, SessionState};

use crate::builder::component::{compose_component, parse_component};
use crate::builder::prompt::{compose_generate, compose_improve};
use crate::builder::resolve::{resolve_generation, resolve_improvement};
use crate::llm::box_provider::BoxLlmProvider;

use super::guard::InFlight;

/// Per-call model parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl GenerationOptions {
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self {
            model: config.provider.model.clone(),
            max_tokens: config.max_tokens,
            temperature: Some(config.temperature),
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::from_config(&GlobalConfig::default())
    }
}

/// Owns one generation session.
pub struct SessionController {
    id: Uuid,
    provider: RwLock<BoxLlmProvider>,
    options: GenerationOptions,
    state: Mutex<SessionState>,
}

impl SessionController {
    /// Start an idle session backed by `provider`.
    pub fn new(provider: BoxLlmProvider, options: GenerationOptions) -> Self {
        let id = Uuid::now_v7();
        debug!(session_id = %id, model = %options.model, "session started");
        Self {
            id,
            provider: RwLock::new(provider),
            options,
            state: Mutex::new(SessionState::Idle),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.lock_state().clone()
    }

    /// The artifact the session currently holds, if any.
    pub fn current_artifact(&self) -> Option<WebsiteArtifact> {
        self.lock_state().artifact().cloned()
    }

    /// Swap in a provider built with fresh credentials.
    ///
    /// An in-flight call keeps using the provider it started with.
    pub fn replace_provider(&self, provider: BoxLlmProvider) {
        let mut slot = self.provider.write().unwrap_or_else(PoisonError::into_inner);
        info!(session_id = %self.id, provider = provider.name(), "provider replaced");
        *slot = provider;
    }

    /// Discard the current artifact and return to `Idle`.
    pub fn reset(&self) -> Result<(), SessionError> {
        let mut state = self.lock_state();
        if state.is_busy() {
            return Err(SessionError::Busy);
        }
        *state = SessionState::Idle;
        debug!(session_id = %self.id, "session reset");
        Ok(())
    }

    /// Seed the session with a previously saved artifact.
    pub fn resume(&self, artifact: WebsiteArtifact) -> Result<(), SessionError> {
        if !artifact.is_renderable() {
            return Err(SessionError::EmptyInput("artifact markup"));
        }
        let mut state = self.lock_state();
        if state.is_busy() {
            return Err(SessionError::Busy);
        }
        *state = SessionState::Ready(artifact);
        debug!(session_id = %self.id, "session resumed from snapshot");
        Ok(())
    }

    /// Generate a new website from a description.
    pub async fn generate(&self, description: &str) -> Result<GenerationOutcome, SessionError> {
        self.generate_with_cancel(description, &CancellationToken::new())
            .await
    }

    /// Generate a new website, aborting if `cancel` fires before the model replies.
    ///
    /// Starts from `Idle`, `Ready` or `Failed`; any existing artifact is
    /// superseded. A transport failure leaves `Failed` with no artifact.
    pub async fn generate_with_cancel(
        &self,
        description: &str,
        cancel: &CancellationToken,
    ) -> Result<GenerationOutcome, SessionError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(SessionError::EmptyInput("description"));
        }

        let guard = InFlight::enter(&self.state, |current| {
            if current.is_busy() {
                Err(SessionError::Busy)
            } else {
                Ok(SessionState::Generating)
            }
        })?;

        let provider = self.provider_handle();
        let span = info_span!(
            "gen_ai.generate",
            session.id = %self.id,
            gen_ai.operation.name = "generate",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %self.options.model,
            gen_ai.request.max_tokens = self.options.max_tokens,
        );

        let prompt = compose_generate(description);
        let reply = self.call(&provider, prompt, cancel).instrument(span).await;

        match reply {
            Ok(text) => {
                let outcome = resolve_generation(&text);
                info!(
                    session_id = %self.id,
                    resolution = ?outcome.resolution,
                    title = %outcome.artifact.title,
                    "website generated"
                );
                guard.commit(SessionState::Ready(outcome.artifact.clone()));
                Ok(outcome)
            }
            Err(SessionError::Transport(error)) => {
                guard.commit(SessionState::Failed {
                    artifact: None,
                    error: error.clone(),
                });
                Err(SessionError::Transport(error))
            }
            Err(other) => Err(other),
        }
    }

    /// Apply an improvement request to the current artifact.
    pub async fn improve(&self, request: &str) -> Result<ImprovementOutcome, SessionError> {
        self.improve_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Apply an improvement request, aborting if `cancel` fires before the model replies.
    ///
    /// Requires `Ready`, or `Failed` that still holds an artifact. A transport
    /// failure keeps that artifact untouched in `Failed`.
    pub async fn improve_with_cancel(
        &self,
        request: &str,
        cancel: &CancellationToken,
    ) -> Result<ImprovementOutcome, SessionError> {
        let request = request.trim();
        if request.is_empty() {
            return Err(SessionError::EmptyInput("improvement request"));
        }

        let guard = InFlight::enter(&self.state, |current| {
            if current.is_busy() {
                return Err(SessionError::Busy);
            }
            current
                .improvable_artifact()
                .map(|artifact| SessionState::Improving(artifact.clone()))
                .ok_or(SessionError::NoArtifact)
        })?;
        let prior = guard
            .previous()
            .improvable_artifact()
            .cloned()
            .ok_or(SessionError::NoArtifact)?;

        let provider = self.provider_handle();
        let span = info_span!(
            "gen_ai.improve",
            session.id = %self.id,
            gen_ai.operation.name = "improve",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %self.options.model,
            gen_ai.request.max_tokens = self.options.max_tokens,
        );

        let prompt = compose_improve(&prior, request);
        let reply = self.call(&provider, prompt, cancel).instrument(span).await;

        match reply {
            Ok(text) => {
                let outcome = resolve_improvement(&text, &prior, request);
                if outcome.changed {
                    info!(
                        session_id = %self.id,
                        resolution = ?outcome.resolution,
                        fields = ?prior.changed_fields(&outcome.artifact),
                        "website improved"
                    );
                } else {
                    warn!(
                        session_id = %self.id,
                        resolution = ?outcome.resolution,
                        "improvement produced no detectable change"
                    );
                }
                guard.commit(SessionState::Ready(outcome.artifact.clone()));
                Ok(outcome)
            }
            Err(SessionError::Transport(error)) => {
                guard.commit(SessionState::Failed {
                    artifact: Some(prior),
                    error: error.clone(),
                });
                Err(SessionError::Transport(error))
            }
            Err(other) => Err(other),
        }
    }

    /// Generate a standalone component. Does not touch session state.
    pub async fn generate_component(
        &self,
        request: &str,
    ) -> Result<ComponentArtifact, SessionError> {
        let request = request.trim();
        if request.is_empty() {
            return Err(SessionError::EmptyInput("component request"));
        }

        let provider = self.provider_handle();
        let span = info_span!(
            "gen_ai.component",
            session.id = %self.id,
            gen_ai.operation.name = "component",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %self.options.model,
        );

        let text = self
            .call(&provider, compose_component(request), &CancellationToken::new())
            .instrument(span)
            .await?;
        Ok(parse_component(&text, request))
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn call(
        &self,
        provider: &BoxLlmProvider,
        prompt: String,
        cancel: &CancellationToken,
    ) -> Result<String, SessionError> {
        let request = CompletionRequest {
            model: self.options.model.clone(),
            messages: vec![Message::user(prompt)],
            system: None,
            max_tokens: self.options.max_tokens,
            temperature: self.options.temperature,
        };

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(session_id = %self.id, "model call cancelled");
                return Err(SessionError::Cancelled);
            }
            result = provider.complete(&request) => result,
        };

        match result {
            Ok(response) => {
                debug!(
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    stop_reason = %response.stop_reason,
                    reply_len = response.content.len(),
                    "model replied"
                );
                Ok(response.content)
            }
            Err(e) => {
                let error = TransportError::from(&e);
                warn!(session_id = %self.id, error = %e, "model call failed");
                Err(SessionError::Transport(error))
            }
        }
    }

    fn provider_handle(&self) -> BoxLlmProvider {
        self.provider
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
