//! Exclusion rule for leaf entries.

use crate::domain::entities::Entry;

/// Names excluded when nothing else is configured.
pub const DEFAULT_EXCLUSIONS: [&str; 6] = ["md", "txt", "gitignore", "gitkeep", "LICENSE", "keep"];

/// Set of rules removing File entries before tree construction.
///
/// Each rule matches a file when either
/// - the final path segment equals the rule exactly (case-sensitive), or
/// - the lowercased path ends with `.` followed by the rule.
///
/// The rule itself is never lowercased, so `LICENSE` only ever matches as a
/// whole file name while `md` matches `README.MD` as well as `notes.md`.
/// Directories are never excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionConfig {
    names: Vec<String>,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS)
    }
}

impl ExclusionConfig {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exclude nothing.
    pub fn none() -> Self {
        Self { names: Vec::new() }
    }

    /// Add rules, skipping ones already present.
    pub fn with_names<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in extra {
            let name = name.into();
            if !self.names.contains(&name) {
                self.names.push(name);
            }
        }
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_excluded(&self, entry: &Entry) -> bool {
        if entry.kind.is_dir() {
            return false;
        }
        let name = entry.name();
        let lowered = entry.path.to_lowercase();
        self.names.iter().any(|rule| {
            name == rule
                || lowered
                    .strip_suffix(rule.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("README.md")]
    #[case("docs/guide.MD")]
    #[case("LICENSE")]
    #[case("vendor/LICENSE")]
    #[case(".gitignore")]
    #[case("assets/.gitkeep")]
    #[case("notes.txt")]
    #[case("cache/.keep")]
    fn given_default_rules_when_checking_file_then_excluded(#[case] path: &str) {
        assert!(ExclusionConfig::default().is_excluded(&Entry::file(path)));
    }

    #[rstest]
    #[case("src/app.ts")]
    #[case("LICENSE-MIT")]
    #[case("license")]
    #[case("src/markdown")]
    #[case("keeper.rs")]
    fn given_default_rules_when_checking_file_then_kept(#[case] path: &str) {
        assert!(!ExclusionConfig::default().is_excluded(&Entry::file(path)));
    }

    #[test]
    fn given_directory_named_like_rule_when_checking_then_never_excluded() {
        let rules = ExclusionConfig::default();
        assert!(!rules.is_excluded(&Entry::dir("docs.md")));
        assert!(!rules.is_excluded(&Entry::dir("LICENSE")));
    }

    #[test]
    fn given_uppercase_rule_when_path_has_matching_extension_then_kept() {
        // Extension matching lowercases the path only, so an uppercase rule
        // can only hit a whole file name.
        let rules = ExclusionConfig::new(["LICENSE"]);
        assert!(!rules.is_excluded(&Entry::file("third_party.LICENSE")));
        assert!(rules.is_excluded(&Entry::file("pkg/LICENSE")));
    }

    #[test]
    fn given_extra_names_when_extending_then_deduplicates() {
        let rules = ExclusionConfig::default().with_names(["md", "lock"]);
        assert_eq!(rules.names().len(), DEFAULT_EXCLUSIONS.len() + 1);
        assert!(rules.is_excluded(&Entry::file("Cargo.lock")));
    }

    #[test]
    fn given_no_rules_when_checking_then_keeps_everything() {
        assert!(!ExclusionConfig::none().is_excluded(&Entry::file("README.md")));
    }
}
