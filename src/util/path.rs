//! Slash-delimited listing paths.
//!
//! Listing paths are plain strings, never OS paths: the separator is always `/`
//! regardless of platform, and nothing is resolved against the filesystem.

pub const SEPARATOR: char = '/';

/// Text after the last separator, or the whole path when there is none.
pub fn final_segment(path: &str) -> &str {
    path.rsplit_once(SEPARATOR)
        .map_or(path, |(_, name)| name)
}

/// Path with its final segment removed.
///
/// Root-level paths (no separator, including the empty path) have no parent.
pub fn parent_path(path: &str) -> Option<&str> {
    path.rsplit_once(SEPARATOR).map(|(parent, _)| parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_root_level_path_when_splitting_then_has_no_parent() {
        assert_eq!(parent_path("README.md"), None);
        assert_eq!(final_segment("README.md"), "README.md");
    }

    #[test]
    fn given_empty_path_when_splitting_then_is_degenerate_root() {
        assert_eq!(parent_path(""), None);
        assert_eq!(final_segment(""), "");
    }

    #[test]
    fn given_nested_path_when_splitting_then_removes_last_segment() {
        assert_eq!(parent_path("a/b/c.ts"), Some("a/b"));
        assert_eq!(final_segment("a/b/c.ts"), "c.ts");
    }
}
