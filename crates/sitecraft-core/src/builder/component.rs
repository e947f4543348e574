//! Reusable component generation.
//!
//! A lighter sibling of website generation: the model is asked for a single
//! self-contained component, and a placeholder component is returned when the
//! reply cannot be parsed.

use tracing::{debug, warn};

use sitecraft_types::artifact::ComponentArtifact;

use super::extractor::{fenced_blocks, first_balanced_object};

const FALLBACK_COMPONENT_NAME: &str = "Custom Component";
const FALLBACK_COMPONENT_STYLE: &str = ".component { padding: 1rem; }";

/// Build the prompt for a reusable component.
pub fn compose_component(request: &str) -> String {
    let sections = [
        "<role>\nYou are an expert web developer. Generate a reusable HTML component.\n</role>".to_string(),
        format!("<component_request>\n{request}\n</component_request>"),
        "<output_format>\nProvide the response as a single JSON object:\n{\n  \"html\": \"component HTML\",\n  \"css\": \"component-specific CSS\",\n  \"js\": \"component JavaScript if needed\",\n  \"name\": \"component name\"\n}\n</output_format>".to_string(),
        "Make it modern, responsive, and reusable.".to_string(),
    ];

    sections.join("\n\n")
}

/// Parse a component reply, falling back to a placeholder on failure.
///
/// Tries the first balanced object, then each ```json block.
pub fn parse_component(reply: &str, request: &str) -> ComponentArtifact {
    let parsed = first_balanced_object(reply)
        .and_then(parse_span)
        .or_else(|| fenced_blocks(reply).find_map(parse_span));

    match parsed {
        Some(mut component) => {
            if component.name.trim().is_empty() {
                component.name = FALLBACK_COMPONENT_NAME.to_string();
            }
            debug!(name = %component.name, "parsed component reply");
            component
        }
        None => {
            warn!(reply_len = reply.len(), "component reply could not be parsed, using placeholder");
            fallback_component(request)
        }
    }
}

/// Placeholder component wrapping the request text.
pub fn fallback_component(request: &str) -> ComponentArtifact {
    ComponentArtifact {
        markup: format!("<div class=\"component\">{request}</div>"),
        style: FALLBACK_COMPONENT_STYLE.to_string(),
        script: String::new(),
        name: FALLBACK_COMPONENT_NAME.to_string(),
    }
}

fn parse_span(span: &str) -> Option<ComponentArtifact> {
    let component: ComponentArtifact = serde_json::from_str(span).ok()?;
    (!component.markup.trim().is_empty()).then_some(component)
}
