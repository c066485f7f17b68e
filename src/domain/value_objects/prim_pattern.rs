//! Prim name patterns used for `--pass` and `--settings` selection.

use std::fmt;

/// A prim selector: a full path (`/Render/beauty`), a bare prim name
/// (`beauty`) or either form with `*` / `?` wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrimPattern(String);

impl PrimPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into().trim().to_string())
    }

    /// Split a user-supplied list (`"beauty, fg*"`) into patterns.
    pub fn parse_list(text: &str) -> Vec<Self> {
        text.split([',', ' '])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::new)
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.0.contains(['*', '?'])
    }

    /// Match against a prim path. Patterns starting with `/` compare with the
    /// whole path, anything else with the prim's own name.
    pub fn matches(&self, prim_path: &str) -> bool {
        if self.0.starts_with('/') {
            return glob_matches(&self.0, prim_path);
        }
        let name = prim_path.rsplit('/').next().unwrap_or(prim_path);
        glob_matches(&self.0, name)
    }
}

impl fmt::Display for PrimPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Minimal glob matcher supporting `*` and `?` over the whole string.
// `*` also matches `/`.
pub(crate) fn glob_matches(pattern: &str, text: &str) -> bool {
    let p = pattern.as_bytes();
    let t = text.as_bytes();

    let (mut pi, mut ti) = (0usize, 0usize);
    let (mut star_pi, mut star_ti) = (None::<usize>, 0usize);

    while ti < t.len() {
        if pi < p.len() && (p[pi] == t[ti] || p[pi] == b'?') {
            pi += 1;
            ti += 1;
            continue;
        }

        if pi < p.len() && p[pi] == b'*' {
            star_pi = Some(pi);
            star_ti = ti;
            pi += 1;
            continue;
        }

        if let Some(sp) = star_pi {
            pi = sp + 1;
            star_ti += 1;
            ti = star_ti;
            continue;
        }

        return false;
    }

    while pi < p.len() && p[pi] == b'*' {
        pi += 1;
    }

    pi == p.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_matches_every_name() {
        let pattern = PrimPattern::new("*");
        assert!(pattern.matches("/Render/Passes/beauty"));
        assert!(pattern.matches("/Render/fg"));
    }

    #[test]
    fn bare_name_matches_last_component_only() {
        let pattern = PrimPattern::new("beauty");
        assert!(pattern.matches("/Render/Passes/beauty"));
        assert!(!pattern.matches("/Render/beauty/extra"));
        assert!(!pattern.matches("/Render/beauty_fg"));
    }

    #[test]
    fn absolute_pattern_matches_full_path() {
        let pattern = PrimPattern::new("/Render/Passes/*");
        assert!(pattern.matches("/Render/Passes/beauty"));
        assert!(!pattern.matches("/Other/Passes/beauty"));
    }

    #[test]
    fn question_mark_matches_single_char() {
        let pattern = PrimPattern::new("fg?");
        assert!(pattern.matches("/Render/fg1"));
        assert!(!pattern.matches("/Render/fg12"));
    }

    #[test]
    fn parse_list_accepts_commas_and_spaces() {
        let patterns = PrimPattern::parse_list("beauty, fg*  /Render/bg");
        let names: Vec<_> = patterns.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["beauty", "fg*", "/Render/bg"]);
        assert!(patterns[1].is_wildcard());
    }

    #[test]
    fn test_glob_matches_wildcard() {
        assert!(glob_matches("fg_*", "fg_chars"));
        assert!(!glob_matches("fg_*", "bg_chars"));
        assert!(glob_matches("*_lgt", "key_lgt"));
    }
}
