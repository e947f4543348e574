//! Session state and operation outcome types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::artifact::{ExtractionTier, WebsiteArtifact};
use crate::error::TransportError;

/// Lifecycle state of a generation session.
///
/// Owned exclusively by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Generating,
    Ready(WebsiteArtifact),
    Improving(WebsiteArtifact),
    Failed {
        artifact: Option<WebsiteArtifact>,
        error: TransportError,
    },
}

impl SessionState {
    /// The artifact this state carries, if any.
    pub fn artifact(&self) -> Option<&WebsiteArtifact> {
        match self {
            SessionState::Ready(a) | SessionState::Improving(a) => Some(a),
            SessionState::Failed { artifact, .. } => artifact.as_ref(),
            SessionState::Idle | SessionState::Generating => None,
        }
    }

    /// Whether a model call is currently in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Generating | SessionState::Improving(_))
    }

    /// The artifact an improvement may be applied against.
    pub fn improvable_artifact(&self) -> Option<&WebsiteArtifact> {
        match self {
            SessionState::Ready(a) => Some(a),
            SessionState::Failed {
                artifact: Some(a), ..
            } => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Generating => write!(f, "generating"),
            SessionState::Ready(_) => write!(f, "ready"),
            SessionState::Improving(_) => write!(f, "improving"),
            SessionState::Failed { .. } => write!(f, "failed"),
        }
    }
}

/// A keyword group of the heuristic fallback engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchGroup {
    Color,
    Motion,
    Responsive,
}

impl fmt::Display for PatchGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchGroup::Color => write!(f, "color"),
            PatchGroup::Motion => write!(f, "motion"),
            PatchGroup::Responsive => write!(f, "responsive"),
        }
    }
}

/// How the pipeline arrived at the new artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Fields were recovered from the reply by the given tier.
    Extracted { tier: ExtractionTier },
    /// Nothing was recoverable; the reply text was wrapped in a document shell.
    Synthesized,
    /// Nothing was recoverable; the heuristic engine patched the prior artifact.
    Heuristic { groups: Vec<PatchGroup> },
}

/// Result of a successful `generate` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub artifact: WebsiteArtifact,
    pub resolution: Resolution,
}

/// Result of a successful `improve` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementOutcome {
    pub artifact: WebsiteArtifact,
    pub resolution: Resolution,
    /// False when the new artifact is field-wise identical to the prior one.
    pub changed: bool,
}
