//! Prompt composer for website generation and improvement.
//!
//! Builds the exact text sent to the model using XML tag boundaries. Both
//! builders are pure functions of their input: no IO, no failure modes.

use sitecraft_types::artifact::{ArtifactField, WebsiteArtifact};

// ---------------------------------------------------------------------------
// Fixed prompt sections
// ---------------------------------------------------------------------------

const ROLE: &str = "You are an expert web developer.";

const GENERATE_REQUIREMENTS: &[&str] = &[
    "Use modern HTML5 semantic elements",
    "Create responsive design that works on mobile and desktop",
    "Include beautiful, modern styling with good color schemes",
    "Add interactive elements where appropriate",
    "Use CSS Grid and Flexbox for layouts",
    "Include proper meta tags and accessibility features",
    "Make it visually appealing with good typography and spacing",
    "Don't use external libraries or frameworks in the generated code",
    "Keep all code inline (no external file references except for common web fonts)",
];

/// Behavioral directives for the model, keyed by the kind of request they answer.
///
/// These are instructions to the model; nothing here is executed locally.
const IMPROVE_DIRECTIVES: &[&str] = &[
    "Make specific, noticeable improvements based on the request",
    "If asked for colors, change the color scheme significantly",
    "If asked for animations, add CSS transitions and hover effects",
    "If asked for responsive design, improve mobile layouts",
    "If asked for dark mode, implement a dark color scheme",
    "Always make visible changes that the user will notice",
    "Keep the existing structure but enhance it",
];

// ---------------------------------------------------------------------------
// Public builders
// ---------------------------------------------------------------------------

/// Build the prompt for a first-time website generation.
///
/// Sections:
/// - `<role>`: the model's persona
/// - `<request>`: the user's description, verbatim
/// - `<output_format>`: the single JSON object to return
/// - `<requirements>`: layout, accessibility and no-external-library rules
pub fn compose_generate(description: &str) -> String {
    let sections = [
        format!("<role>\n{ROLE} Generate a complete, modern, responsive website based on the request below.\n</role>"),
        format!("<request>\n{description}\n</request>"),
        format!(
            "<output_format>\nProvide the response as a single JSON object:\n{}\n</output_format>",
            output_schema(&[
                "complete HTML structure with proper semantic tags",
                "modern CSS with responsive design, flexbox/grid, and beautiful styling",
                "vanilla JavaScript for any interactive features",
                "website title",
                "brief description of the website",
            ])
        ),
        format!(
            "<requirements>\n{}\n</requirements>",
            bullet_list(GENERATE_REQUIREMENTS)
        ),
        "Generate a professional, production-ready website.".to_string(),
    ];

    sections.join("\n\n")
}

/// Build the prompt for improving an existing website.
///
/// Embeds the full current artifact under `<current_website>`, the
/// instruction under `<improvement_request>`, the directive list, and the
/// required output object.
pub fn compose_improve(artifact: &WebsiteArtifact, request: &str) -> String {
    let sections = [
        format!("<role>\n{ROLE} Improve the following website code based on a specific request.\n</role>"),
        format!("<current_website>\n{}\n</current_website>", current_website(artifact)),
        format!("<improvement_request>\n{request}\n</improvement_request>"),
        format!("<instructions>\n{}\n</instructions>", bullet_list(IMPROVE_DIRECTIVES)),
        format!(
            "<output_format>\nRespond ONLY with this JSON object, no explanatory text before or after:\n{}\n</output_format>",
            output_schema(&[
                "IMPROVED HTML CODE HERE",
                "IMPROVED CSS CODE HERE",
                "IMPROVED JAVASCRIPT CODE HERE",
                "updated title if needed or keep original",
                "updated description if needed or keep original",
            ])
        ),
    ];

    sections.join("\n\n")
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Render the JSON object template using the primary wire key of each field.
fn output_schema(hints: &[&str; 5]) -> String {
    let lines: Vec<String> = ArtifactField::ALL
        .iter()
        .zip(hints.iter())
        .map(|(field, hint)| format!("  \"{}\": \"{}\"", field.wire_keys()[0], hint))
        .collect();
    format!("{{\n{}\n}}", lines.join(",\n"))
}

fn current_website(artifact: &WebsiteArtifact) -> String {
    ArtifactField::ALL
        .iter()
        .map(|field| {
            // Prefixed so embedded markup can never close the section early.
            let tag = format!("current_{field}");
            format!("<{tag}>\n{}\n</{tag}>", artifact.field(*field))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bullet_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> WebsiteArtifact {
        WebsiteArtifact {
            markup: "<header>Sweet Crumbs</header>".to_string(),
            style: "header{color:#a52}".to_string(),
            script: "console.log('hi')".to_string(),
            title: "Sweet Crumbs Bakery".to_string(),
            description: "A neighbourhood bakery".to_string(),
        }
    }

    #[test]
    fn test_generate_embeds_description() {
        let prompt = compose_generate("a bakery website with online ordering");
        assert!(prompt.contains("<request>\na bakery website with online ordering\n</request>"));
    }

    #[test]
    fn test_generate_requests_all_fields() {
        let prompt = compose_generate("portfolio");
        for key in ["\"html\"", "\"css\"", "\"js\"", "\"title\"", "\"description\""] {
            assert!(prompt.contains(key), "missing {key}");
        }
    }

    #[test]
    fn test_generate_forbids_external_libraries() {
        let prompt = compose_generate("portfolio");
        assert!(prompt.contains("Don't use external libraries"));
        assert!(prompt.contains("accessibility"));
        assert!(prompt.contains("responsive"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        assert_eq!(compose_generate("x"), compose_generate("x"));
    }

    #[test]
    fn test_improve_embeds_full_artifact() {
        let prompt = compose_improve(&artifact(), "make it more vibrant");
        assert!(prompt.contains("<current_markup>\n<header>Sweet Crumbs</header>\n</current_markup>"));
        assert!(prompt.contains("header{color:#a52}"));
        assert!(prompt.contains("console.log('hi')"));
        assert!(prompt.contains("<current_title>\nSweet Crumbs Bakery\n</current_title>"));
        assert!(prompt.contains("A neighbourhood bakery"));
        assert!(prompt.contains("<improvement_request>\nmake it more vibrant\n</improvement_request>"));
    }

    #[test]
    fn test_improve_sections_survive_full_document_markup() {
        let full = WebsiteArtifact {
            markup: "<!DOCTYPE html><html><head><title>Old</title><style>p{}</style></head>\
                     <body><script>go()</script></body></html>"
                .to_string(),
            ..artifact()
        };
        let prompt = compose_improve(&full, "make it more vibrant");

        let open = prompt.find("<current_markup>\n").unwrap() + "<current_markup>\n".len();
        let close = prompt.find("\n</current_markup>").unwrap();
        assert_eq!(&prompt[open..close], full.markup);
        for field in ArtifactField::ALL {
            let tag = format!("</current_{field}>");
            assert_eq!(prompt.matches(&tag).count(), 1, "{tag} must appear once");
        }
    }

    #[test]
    fn test_improve_includes_directives_and_json_only_rule() {
        let prompt = compose_improve(&artifact(), "add hover effects");
        assert!(prompt.contains("change the color scheme significantly"));
        assert!(prompt.contains("add CSS transitions and hover effects"));
        assert!(prompt.contains("Respond ONLY with this JSON object"));
    }

    #[test]
    fn test_output_schema_shape() {
        let schema = output_schema(&["a", "b", "c", "d", "e"]);
        let parsed: serde_json::Value = serde_json::from_str(&schema).unwrap();
        assert_eq!(parsed["html"], "a");
        assert_eq!(parsed["description"], "e");
    }
}
