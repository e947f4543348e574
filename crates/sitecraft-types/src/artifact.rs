//! Website artifact types.
//!
//! A [`WebsiteArtifact`] is the canonical snapshot of a generated site. The
//! response extractor produces [`CandidateFields`] (a partial artifact) wrapped
//! in an [`ExtractionResult`]; the merger folds candidates into a new artifact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The canonical structured representation of a generated website.
///
/// Artifacts are immutable snapshots: every improvement produces a new value
/// that supersedes the previous one. Equality is field-wise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteArtifact {
    #[serde(default, alias = "html")]
    pub markup: String,
    #[serde(default, alias = "css")]
    pub style: String,
    #[serde(default, alias = "js")]
    pub script: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl WebsiteArtifact {
    /// Read a single field by name.
    pub fn field(&self, field: ArtifactField) -> &str {
        match field {
            ArtifactField::Markup => &self.markup,
            ArtifactField::Style => &self.style,
            ArtifactField::Script => &self.script,
            ArtifactField::Title => &self.title,
            ArtifactField::Description => &self.description,
        }
    }

    /// Whether the artifact has markup worth rendering.
    pub fn is_renderable(&self) -> bool {
        !self.markup.trim().is_empty()
    }

    /// Fields whose values differ between `self` and `other`.
    pub fn changed_fields(&self, other: &WebsiteArtifact) -> Vec<ArtifactField> {
        ArtifactField::ALL
            .into_iter()
            .filter(|f| self.field(*f) != other.field(*f))
            .collect()
    }
}

/// One of the five artifact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactField {
    Markup,
    Style,
    Script,
    Title,
    Description,
}

impl ArtifactField {
    /// All fields in canonical order.
    pub const ALL: [ArtifactField; 5] = [
        ArtifactField::Markup,
        ArtifactField::Style,
        ArtifactField::Script,
        ArtifactField::Title,
        ArtifactField::Description,
    ];

    /// The code-bearing fields (recoverable by field-level scanning).
    pub const CODE: [ArtifactField; 3] = [
        ArtifactField::Markup,
        ArtifactField::Style,
        ArtifactField::Script,
    ];

    /// Keys under which a model reply may carry this field.
    ///
    /// The first key is the one the prompts ask for.
    pub fn wire_keys(&self) -> &'static [&'static str] {
        match self {
            ArtifactField::Markup => &["html", "markup"],
            ArtifactField::Style => &["css", "style"],
            ArtifactField::Script => &["js", "script"],
            ArtifactField::Title => &["title"],
            ArtifactField::Description => &["description"],
        }
    }
}

impl fmt::Display for ArtifactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactField::Markup => write!(f, "markup"),
            ArtifactField::Style => write!(f, "style"),
            ArtifactField::Script => write!(f, "script"),
            ArtifactField::Title => write!(f, "title"),
            ArtifactField::Description => write!(f, "description"),
        }
    }
}

impl FromStr for ArtifactField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ArtifactField::ALL
            .into_iter()
            .find(|f| f.wire_keys().contains(&lower.as_str()))
            .ok_or_else(|| format!("invalid artifact field: '{s}'"))
    }
}

/// A partial artifact recovered from a model reply.
///
/// Absent fields are `None`. No defaulting happens here; that is the
/// merger's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CandidateFields {
    pub fn get(&self, field: ArtifactField) -> Option<&str> {
        match field {
            ArtifactField::Markup => self.markup.as_deref(),
            ArtifactField::Style => self.style.as_deref(),
            ArtifactField::Script => self.script.as_deref(),
            ArtifactField::Title => self.title.as_deref(),
            ArtifactField::Description => self.description.as_deref(),
        }
    }

    pub fn set(&mut self, field: ArtifactField, value: String) {
        let slot = match field {
            ArtifactField::Markup => &mut self.markup,
            ArtifactField::Style => &mut self.style,
            ArtifactField::Script => &mut self.script,
            ArtifactField::Title => &mut self.title,
            ArtifactField::Description => &mut self.description,
        };
        *slot = Some(value);
    }

    /// Fields that carry a value, in canonical order.
    pub fn present(&self) -> Vec<ArtifactField> {
        ArtifactField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_some())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }
}

impl From<WebsiteArtifact> for CandidateFields {
    fn from(artifact: WebsiteArtifact) -> Self {
        Self {
            markup: Some(artifact.markup),
            style: Some(artifact.style),
            script: Some(artifact.script),
            title: Some(artifact.title),
            description: Some(artifact.description),
        }
    }
}

/// Which extraction strategy recovered the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionTier {
    /// First balanced object in the raw text.
    Direct,
    /// Object inside a ```json fenced block.
    Fenced,
    /// Per-field pattern scan over the raw text.
    FieldScan,
}

impl fmt::Display for ExtractionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionTier::Direct => write!(f, "direct"),
            ExtractionTier::Fenced => write!(f, "fenced"),
            ExtractionTier::FieldScan => write!(f, "field_scan"),
        }
    }
}

/// Outcome of running the response extractor over a raw reply.
///
/// Never an error: malformed or missing fields are simply absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    Parsed {
        fields: CandidateFields,
        tier: ExtractionTier,
    },
    Failed,
}

impl ExtractionResult {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ExtractionResult::Parsed { .. })
    }

    pub fn tier(&self) -> Option<ExtractionTier> {
        match self {
            ExtractionResult::Parsed { tier, .. } => Some(*tier),
            ExtractionResult::Failed => None,
        }
    }

    pub fn fields(&self) -> Option<&CandidateFields> {
        match self {
            ExtractionResult::Parsed { fields, .. } => Some(fields),
            ExtractionResult::Failed => None,
        }
    }
}

/// A reusable page component generated on request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentArtifact {
    #[serde(default, alias = "html")]
    pub markup: String,
    #[serde(default, alias = "css")]
    pub style: String,
    #[serde(default, alias = "js")]
    pub script: String,
    #[serde(default)]
    pub name: String,
}
