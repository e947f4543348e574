//! Tiered response extractor.
//!
//! Model replies are supposed to be a bare JSON object but routinely arrive
//! wrapped in prose or markdown fences, or with broken escaping. Extraction
//! tries progressively looser strategies and stops at the first one that
//! yields a usable field:
//!
//! 1. **Direct** -- the first balanced `{...}` span in the reply, parsed as JSON.
//! 2. **Fenced** -- the same parse applied to the interior of a ```` ```json ```` block.
//! 3. **Field scan** -- independent `"key": "value"` pattern matches for the
//!    three code fields (markup, style, script).
//!
//! A tier is usable when it recovers at least one non-blank field value.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use sitecraft_types::artifact::{ArtifactField, CandidateFields, ExtractionResult, ExtractionTier};

/// Characters of the raw reply included in failure logs.
const LOG_PREVIEW_CHARS: usize = 500;

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```json[^\n]*\n?(.*?)```").expect("fenced block pattern is valid")
});

static FIELD_PATTERNS: LazyLock<Vec<(ArtifactField, Regex)>> = LazyLock::new(|| {
    ArtifactField::CODE
        .into_iter()
        .map(|field| {
            let keys = field
                .wire_keys()
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r#"(?s)"(?:{keys})"\s*:\s*"((?:[^"\\]|\\.)*)""#);
            let re = Regex::new(&pattern).expect("field pattern is valid");
            (field, re)
        })
        .collect()
});

/// Run every tier in order over a raw model reply.
pub fn extract(raw: &str) -> ExtractionResult {
    if let Some(fields) = extract_direct(raw) {
        debug!(fields = ?fields.present(), "extracted reply from bare object");
        return ExtractionResult::Parsed {
            fields,
            tier: ExtractionTier::Direct,
        };
    }

    if let Some(fields) = extract_fenced(raw) {
        debug!(fields = ?fields.present(), "extracted reply from fenced json block");
        return ExtractionResult::Parsed {
            fields,
            tier: ExtractionTier::Fenced,
        };
    }

    if let Some(fields) = extract_field_scan(raw) {
        debug!(fields = ?fields.present(), "reconstructed reply from field patterns");
        return ExtractionResult::Parsed {
            fields,
            tier: ExtractionTier::FieldScan,
        };
    }

    warn!(
        reply_len = raw.len(),
        preview = %preview(raw),
        "no structured content found in model reply"
    );
    ExtractionResult::Failed
}

/// Tier 1: parse the first balanced object span in the text.
pub fn extract_direct(text: &str) -> Option<CandidateFields> {
    first_balanced_object(text).and_then(parse_object)
}

/// Tier 2: run the tier-1 parse over each ```json block until one is usable.
pub fn extract_fenced(text: &str) -> Option<CandidateFields> {
    fenced_blocks(text).find_map(extract_direct)
}

/// Interiors of every ```json block in the text, in order.
pub(crate) fn fenced_blocks(text: &str) -> impl Iterator<Item = &str> {
    FENCED_JSON
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|interior| interior.as_str())
}

/// Tier 3: scan for each code field independently.
///
/// Title and description are never attempted here.
pub fn extract_field_scan(text: &str) -> Option<CandidateFields> {
    let mut fields = CandidateFields::default();
    for (field, re) in FIELD_PATTERNS.iter() {
        if let Some(value) = re.captures(text).and_then(|caps| caps.get(1)) {
            fields.set(*field, unescape(value.as_str()));
        }
    }
    usable(fields)
}

/// Locate the first `{` and its matching `}`.
///
/// Braces inside JSON string literals are ignored, so CSS rules embedded in
/// string values do not unbalance the scan.
pub(crate) fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse a candidate span into whatever artifact fields it carries.
///
/// Non-string values and unknown keys are ignored. When a field appears
/// under two aliases the first key in map order wins.
pub(crate) fn parse_object(span: &str) -> Option<CandidateFields> {
    let map: Map<String, Value> = serde_json::from_str(span).ok()?;
    let mut fields = CandidateFields::default();

    for (key, value) in map {
        let (Ok(field), Value::String(text)) = (key.parse::<ArtifactField>(), value) else {
            continue;
        };
        if fields.get(field).is_none() {
            fields.set(field, text);
        }
    }

    usable(fields)
}

fn usable(fields: CandidateFields) -> Option<CandidateFields> {
    let any_content = ArtifactField::ALL
        .into_iter()
        .any(|f| fields.get(f).is_some_and(|v| !v.trim().is_empty()));
    any_content.then_some(fields)
}

/// Decode JSON string escapes in a scraped value.
///
/// Scraped values are often not valid JSON (raw newlines, stray escapes), so
/// a lenient decoder handles what `serde_json` rejects.
pub(crate) fn unescape(raw: &str) -> String {
    if let Ok(decoded) = serde_json::from_str::<String>(&format!("\"{raw}\"")) {
        return decoded;
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn preview(raw: &str) -> String {
    raw.chars().take(LOG_PREVIEW_CHARS).collect()
}
