//! Artifact validator/merger.
//!
//! Folds extracted candidate fields into a new canonical artifact. Merging is
//! field-level: a candidate that omits (or blanks) a field inherits that field
//! from the prior artifact instead of erasing it.

use sitecraft_types::artifact::{ArtifactField, CandidateFields, WebsiteArtifact};

/// Title given to artifacts that had to be synthesized from raw text.
pub const FALLBACK_TITLE: &str = "Generated Website";

/// Description given to artifacts that had to be synthesized from raw text.
pub const FALLBACK_DESCRIPTION: &str = "AI-generated website";

/// Merge candidate fields over an optional prior artifact.
///
/// For each field: the candidate value if it is non-blank, else the prior
/// artifact's value, else an empty string.
pub fn merge_candidate(
    candidate: &CandidateFields,
    prior: Option<&WebsiteArtifact>,
) -> WebsiteArtifact {
    let pick = |field: ArtifactField| -> String {
        match candidate.get(field) {
            Some(value) if !value.trim().is_empty() => value.to_string(),
            _ => prior.map(|p| p.field(field).to_string()).unwrap_or_default(),
        }
    };

    WebsiteArtifact {
        markup: pick(ArtifactField::Markup),
        style: pick(ArtifactField::Style),
        script: pick(ArtifactField::Script),
        title: pick(ArtifactField::Title),
        description: pick(ArtifactField::Description),
    }
}

/// Wrap a raw reply in a minimal document shell.
///
/// Used when a first generation yields no recoverable markup, so the session
/// always ends up with something renderable. The text is embedded verbatim.
pub fn synthesize_fallback(raw: &str) -> WebsiteArtifact {
    WebsiteArtifact {
        markup: fallback_shell(raw),
        style: String::new(),
        script: String::new(),
        title: FALLBACK_TITLE.to_string(),
        description: FALLBACK_DESCRIPTION.to_string(),
    }
}

pub(crate) fn fallback_shell(raw: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{FALLBACK_TITLE}</title></head>\
         <body><h1>Generated Content</h1><p>{raw}</p></body></html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prior() -> WebsiteArtifact {
        WebsiteArtifact {
            markup: "<main>old</main>".to_string(),
            style: "main{color:black}".to_string(),
            script: "init();".to_string(),
            title: "Old Title".to_string(),
            description: "Old description".to_string(),
        }
    }

    fn only(field: ArtifactField, value: &str) -> CandidateFields {
        let mut c = CandidateFields::default();
        c.set(field, value.to_string());
        c
    }

    #[test]
    fn test_omitted_field_keeps_prior_value_for_every_field() {
        let a = prior();
        for omitted in ArtifactField::ALL {
            let mut candidate = CandidateFields::from(WebsiteArtifact {
                markup: "<main>new</main>".to_string(),
                style: "main{color:red}".to_string(),
                script: "start();".to_string(),
                title: "New Title".to_string(),
                description: "New description".to_string(),
            });
            match omitted {
                ArtifactField::Markup => candidate.markup = None,
                ArtifactField::Style => candidate.style = None,
                ArtifactField::Script => candidate.script = None,
                ArtifactField::Title => candidate.title = None,
                ArtifactField::Description => candidate.description = None,
            }

            let merged = merge_candidate(&candidate, Some(&a));
            assert_eq!(merged.field(omitted), a.field(omitted), "field {omitted} was lost");
            for other in ArtifactField::ALL.into_iter().filter(|f| *f != omitted) {
                assert_ne!(merged.field(other), a.field(other), "field {other} not replaced");
            }
        }
    }

    #[test]
    fn test_blank_candidate_value_does_not_erase() {
        let merged = merge_candidate(&only(ArtifactField::Script, "   "), Some(&prior()));
        assert_eq!(merged, prior());
    }

    #[test]
    fn test_style_only_candidate_preserves_script() {
        let merged = merge_candidate(&only(ArtifactField::Style, "body{}"), Some(&prior()));
        assert_eq!(merged.style, "body{}");
        assert_eq!(merged.script, "init();");
        assert_eq!(merged.markup, "<main>old</main>");
    }

    #[test]
    fn test_no_prior_defaults_to_empty() {
        let merged = merge_candidate(&only(ArtifactField::Markup, "<p/>"), None);
        assert_eq!(merged.markup, "<p/>");
        assert_eq!(merged.style, "");
        assert_eq!(merged.title, "");
    }

    #[test]
    fn test_synthesized_fallback_wraps_text() {
        let a = synthesize_fallback("Sorry, here is a bakery idea.");
        assert!(a.markup.starts_with("<!DOCTYPE html>"));
        assert!(a.markup.contains("<p>Sorry, here is a bakery idea.</p>"));
        assert!(a.style.is_empty());
        assert!(a.script.is_empty());
        assert_eq!(a.title, FALLBACK_TITLE);
        assert_eq!(a.description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_synthesized_fallback_is_renderable_for_empty_reply() {
        assert!(synthesize_fallback("").is_renderable());
    }
}
