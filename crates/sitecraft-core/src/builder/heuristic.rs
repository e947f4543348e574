//! Heuristic fallback engine.
//!
//! When a model reply to an improvement request carries no structured content
//! at all, the request text is matched against fixed keyword groups and a
//! canned style fragment is appended for each group that matches. The engine
//! never fails; with no matching group the prior artifact is returned as-is.

use sitecraft_types::artifact::WebsiteArtifact;
use sitecraft_types::session::PatchGroup;

const COLOR_FRAGMENT: &str = "

/* Auto-applied color improvements */
:root {
  --primary-color: #667eea;
  --secondary-color: #764ba2;
  --accent-color: #f093fb;
}
body { background: linear-gradient(135deg, var(--primary-color), var(--secondary-color)); }
h1, h2, h3 { color: var(--accent-color); }
";

const MOTION_FRAGMENT: &str = "

/* Auto-applied animation improvements */
* { transition: all 0.3s ease; }
button:hover, .btn:hover { transform: translateY(-2px); box-shadow: 0 4px 15px rgba(0,0,0,0.2); }
h1, h2, h3 { animation: fadeInUp 0.6s ease-out; }
@keyframes fadeInUp { from { opacity: 0; transform: translateY(20px); } to { opacity: 1; transform: translateY(0); } }
";

const RESPONSIVE_FRAGMENT: &str = "

/* Auto-applied responsive improvements */
@media (max-width: 768px) {
  body { padding: 1rem; }
  h1 { font-size: 2rem; }
  .container { max-width: 100%; padding: 0 1rem; }
}
";

/// Keyword groups in application order.
const GROUPS: &[(PatchGroup, &[&str], &str)] = &[
    (
        PatchGroup::Color,
        &["color", "colour", "vibrant"],
        COLOR_FRAGMENT,
    ),
    (
        PatchGroup::Motion,
        &["animation", "animate", "hover", "transition"],
        MOTION_FRAGMENT,
    ),
    (
        PatchGroup::Responsive,
        &["mobile", "responsive"],
        RESPONSIVE_FRAGMENT,
    ),
];

/// Result of running the engine: the patched artifact and the groups applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicPatch {
    pub artifact: WebsiteArtifact,
    pub groups: Vec<PatchGroup>,
}

impl HeuristicPatch {
    /// True when no keyword group matched.
    pub fn is_noop(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Groups whose keywords appear in the request, in application order.
pub fn matching_groups(request: &str) -> Vec<PatchGroup> {
    let lowered = request.to_lowercase();
    GROUPS
        .iter()
        .filter(|(_, keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(group, _, _)| *group)
        .collect()
}

/// Patch the prior artifact's style based on keywords in `request`.
///
/// Only `style` is touched; every other field is carried over unchanged.
pub fn apply_heuristics(prior: &WebsiteArtifact, request: &str) -> HeuristicPatch {
    let groups = matching_groups(request);
    let mut artifact = prior.clone();

    for (group, _, fragment) in GROUPS {
        if groups.contains(group) {
            artifact.style.push_str(fragment);
        }
    }

    HeuristicPatch { artifact, groups }
}
