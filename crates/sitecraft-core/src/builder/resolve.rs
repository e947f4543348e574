//! Reply resolution: raw model text in, canonical artifact out.
//!
//! Chains the extractor with the merger (and, for improvements, the heuristic
//! engine). Neither function can fail; a malformed reply degrades to a
//! synthesized or heuristically patched artifact.

use tracing::{debug, warn};

use sitecraft_types::artifact::{ExtractionResult, WebsiteArtifact};
use sitecraft_types::session::{GenerationOutcome, ImprovementOutcome, Resolution};

use super::extractor::extract;
use super::heuristic::apply_heuristics;
use super::merge::{fallback_shell, merge_candidate, synthesize_fallback};

/// Resolve the reply to a first-time generation.
///
/// The resulting markup is never empty: when nothing usable was extracted,
/// or the extracted fields lack markup, the raw reply is wrapped in a
/// document shell.
pub fn resolve_generation(raw: &str) -> GenerationOutcome {
    match extract(raw) {
        ExtractionResult::Parsed { fields, tier } => {
            let mut artifact = merge_candidate(&fields, None);
            if !artifact.is_renderable() {
                debug!(%tier, "extracted reply has no markup, wrapping raw text");
                artifact.markup = fallback_shell(raw);
            }
            GenerationOutcome {
                artifact,
                resolution: Resolution::Extracted { tier },
            }
        }
        ExtractionResult::Failed => {
            warn!("generation reply unparseable, synthesizing fallback document");
            GenerationOutcome {
                artifact: synthesize_fallback(raw),
                resolution: Resolution::Synthesized,
            }
        }
    }
}

/// Resolve the reply to an improvement request against `prior`.
pub fn resolve_improvement(raw: &str, prior: &WebsiteArtifact, request: &str) -> ImprovementOutcome {
    let (artifact, resolution) = match extract(raw) {
        ExtractionResult::Parsed { fields, tier } => (
            merge_candidate(&fields, Some(prior)),
            Resolution::Extracted { tier },
        ),
        ExtractionResult::Failed => {
            let patch = apply_heuristics(prior, request);
            warn!(groups = ?patch.groups, "improvement reply unparseable, applied heuristic patch");
            (
                patch.artifact,
                Resolution::Heuristic {
                    groups: patch.groups,
                },
            )
        }
    };

    let changed = artifact != *prior;
    ImprovementOutcome {
        artifact,
        resolution,
        changed,
    }
}
