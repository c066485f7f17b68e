//! Path mapping rules applied to scene and output paths.

use serde::{Deserialize, Serialize};

/// A single prefix substitution (`from` -> `to`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathMappingRule {
    pub from: String,
    pub to: String,
}

/// Ordered prefix rules. The first matching rule wins; backslashes are
/// normalised to `/` before matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMapping {
    rules: Vec<PathMappingRule>,
}

impl PathMapping {
    pub fn new(rules: Vec<PathMappingRule>) -> Self {
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, path: &str) -> String {
        let normalized = path.replace('\\', "/");
        for rule in &self.rules {
            let from = rule.from.replace('\\', "/");
            if from.is_empty() {
                continue;
            }
            if let Some(rest) = strip_prefix_ci(&normalized, &from) {
                return format!("{}{}", rule.to.replace('\\', "/"), rest);
            }
        }
        normalized
    }
}

// Windows drive letters differ in case between submitters. The prefix must
// end on a path component boundary.
fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    if text.len() < prefix.len() || !text.is_char_boundary(prefix.len()) {
        return None;
    }
    let (head, rest) = text.split_at(prefix.len());
    let on_boundary = prefix.ends_with('/') || rest.is_empty() || rest.starts_with('/');
    (on_boundary && head.eq_ignore_ascii_case(prefix)).then_some(rest)
}
