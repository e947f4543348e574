//! Standalone document composition and export naming.

use sitecraft_types::artifact::WebsiteArtifact;

use crate::builder::merge::{FALLBACK_DESCRIPTION, FALLBACK_TITLE};

const DEFAULT_STEM: &str = "website";

/// Compose a self-contained HTML document from an artifact.
///
/// Pure: equal artifacts always produce byte-identical documents.
pub fn compose_document(artifact: &WebsiteArtifact) -> String {
    let title = escape_html(non_blank_or(&artifact.title, FALLBACK_TITLE));
    let description = escape_html(non_blank_or(&artifact.description, FALLBACK_DESCRIPTION));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="description" content="{description}">
    <style>
        {style}
    </style>
</head>
<body>
    {markup}
    <script>
        {script}
    </script>
</body>
</html>"#,
        style = artifact.style,
        markup = artifact.markup,
        script = artifact.script,
    )
}

/// Derive the download filename for an artifact title.
///
/// `"Sweet Crumbs Bakery!"` becomes `sweet-crumbs-bakery.html`.
pub fn export_filename(title: &str) -> String {
    format!("{}.html", slug(title))
}

/// Filename of the JSON snapshot stored next to an exported document.
pub fn snapshot_filename(title: &str) -> String {
    format!("{}.artifact.json", slug(title))
}

fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_sep = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(ch);
        } else {
            pending_sep = true;
        }
    }

    if out.is_empty() {
        DEFAULT_STEM.to_string()
    } else {
        out
    }
}

fn non_blank_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() { default } else { value }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
