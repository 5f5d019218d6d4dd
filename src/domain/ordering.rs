//! Sibling ordering: directories first, then by name.

use std::cmp::Ordering;

use crate::domain::entities::Node;

/// How names are compared within one kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameOrder {
    /// Compare lowercased names, breaking ties by the original text (`a` < `B` < `b`).
    #[default]
    CaseInsensitive,
    /// Plain code point order (`B` < `a`).
    CaseSensitive,
}

impl NameOrder {
    pub fn from_case_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive {
            Self::CaseSensitive
        } else {
            Self::CaseInsensitive
        }
    }

    /// Total order over nodes.
    ///
    /// Siblings never share a path, but roots may share a name (orphans from
    /// different directories), so the full path is the final tiebreak.
    pub fn compare(self, a: &Node, b: &Node) -> Ordering {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| self.compare_names(&a.name, &b.name))
            .then_with(|| a.path.cmp(&b.path))
    }

    pub fn compare_names(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::CaseInsensitive => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
                .then_with(|| a.cmp(b)),
            Self::CaseSensitive => a.cmp(b),
        }
    }

    pub fn sort(self, nodes: &mut [Node]) {
        nodes.sort_by(|a, b| self.compare(a, b));
    }
}
