//! Tree builder reconstructing the directory hierarchy of a flat listing.

use tracing::{debug, instrument, warn};

use crate::domain::arena::TreeArena;
use crate::domain::entities::{Entry, Node};
use crate::domain::exclusion::ExclusionConfig;
use crate::domain::ordering::NameOrder;

/// Constructs a sorted forest from listing entries.
///
/// Building never fails. Entries whose parent directory is not listed
/// (orphans) become additional roots instead of being dropped, and a repeated
/// path keeps its first occurrence.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    exclusions: ExclusionConfig,
    order: NameOrder,
}

impl TreeBuilder {
    pub fn new(exclusions: ExclusionConfig) -> Self {
        Self {
            exclusions,
            order: NameOrder::default(),
        }
    }

    pub fn with_order(mut self, order: NameOrder) -> Self {
        self.order = order;
        self
    }

    pub fn exclusions(&self) -> &ExclusionConfig {
        &self.exclusions
    }

    /// Build the forest for one complete listing.
    #[instrument(level = "debug", skip_all, fields(entries = entries.len()))]
    pub fn build(&self, entries: &[Entry]) -> Vec<Node> {
        let (dirs, files): (Vec<&Entry>, Vec<&Entry>) = entries
            .iter()
            .filter(|entry| !self.exclusions.is_excluded(entry))
            .partition(|entry| entry.kind.is_dir());
        debug!(
            dirs = dirs.len(),
            files = files.len(),
            excluded = entries.len() - dirs.len() - files.len(),
            "partitioned listing"
        );

        // Directories go in first so a file can never shadow a directory path
        let mut arena = TreeArena::with_capacity(dirs.len() + files.len());
        let mut staged = Vec::with_capacity(dirs.len() + files.len());
        for entry in dirs.iter().chain(files.iter()) {
            match arena.insert_node(Node::from_entry(entry)) {
                Some(idx) => staged.push((idx, *entry)),
                None => warn!(path = %entry.path, "duplicate path in listing, keeping first"),
            }
        }

        // Staged in directory-then-file order, so directories are linked first
        let mut orphans = 0usize;
        for (idx, entry) in staged {
            let Some(parent_path) = entry.parent_path() else {
                continue;
            };
            match arena.directory(parent_path) {
                Some(parent) => {
                    arena.link(idx, parent);
                }
                None => {
                    orphans += 1;
                    debug!(path = %entry.path, parent = parent_path, "parent not listed, promoting to root");
                }
            }
        }

        let forest = arena.into_forest(self.order);
        debug!(roots = forest.len(), orphans, "built forest");
        forest
    }
}

/// Build a forest with the default ordering.
pub fn build_forest(entries: &[Entry], exclusions: &ExclusionConfig) -> Vec<Node> {
    TreeBuilder::new(exclusions.clone()).build(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EntryKind;

    #[test]
    fn given_empty_entries_when_building_then_empty_forest() {
        assert!(TreeBuilder::default().build(&[]).is_empty());
    }

    #[test]
    fn given_file_before_its_directory_when_building_then_still_linked() {
        let entries = vec![Entry::file("src/lib.rs"), Entry::dir("src")];

        let forest = TreeBuilder::default().build(&entries);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].kind, EntryKind::Directory);
        assert_eq!(forest[0].children[0].path, "src/lib.rs");
    }

    #[test]
    fn given_file_and_directory_sharing_path_when_building_then_directory_wins() {
        let entries = vec![
            Entry::file("build"),
            Entry::dir("build"),
            Entry::file("build/out.o"),
        ];

        let forest = TreeBuilder::default().build(&entries);

        assert_eq!(forest.len(), 1);
        assert!(forest[0].is_dir());
        assert_eq!(forest[0].children.len(), 1);
    }

    #[test]
    fn given_file_as_parent_path_when_building_then_not_nested_under_file() {
        let entries = vec![Entry::file("notes"), Entry::file("notes/inner.rs")];

        let forest = TreeBuilder::default().build(&entries);

        assert_eq!(forest.len(), 2);
        assert!(forest.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn given_empty_path_when_building_then_degenerate_root() {
        let forest = TreeBuilder::new(ExclusionConfig::none()).build(&[Entry::file("")]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].name, "");
    }
}
