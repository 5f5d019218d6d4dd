//! Domain entities: flat listing entries and reconstructed tree nodes

use std::fmt;

use serde::Serialize;

use crate::util::path::{final_segment, parent_path};

/// Kind of a listing entry, using git's object type names on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryKind {
    #[serde(rename = "tree")]
    Directory,
    #[serde(rename = "blob")]
    File,
}

impl EntryKind {
    /// Map a git object type to an entry kind.
    ///
    /// Submodule gitlinks (`commit`) have no listed children, so they are leaves.
    pub fn from_git_type(kind: &str) -> Option<Self> {
        match kind {
            "tree" => Some(Self::Directory),
            "blob" | "commit" => Some(Self::File),
            _ => None,
        }
    }

    pub fn is_dir(self) -> bool {
        self == Self::Directory
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => write!(f, "tree"),
            Self::File => write!(f, "blob"),
        }
    }
}

/// One flat record of a repository listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::Directory)
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::File)
    }

    /// Final path segment.
    pub fn name(&self) -> &str {
        final_segment(&self.path)
    }

    /// Path with the final segment removed, `None` for root-level entries.
    pub fn parent_path(&self) -> Option<&str> {
        parent_path(&self.path)
    }
}

/// A reconstructed tree element. Owns its children exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub path: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            name: entry.name().to_string(),
            path: entry.path.clone(),
            kind: entry.kind,
            children: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Number of levels from this node down to its deepest descendant (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Paths of all nodes without children, in tree order.
    ///
    /// Empty directories count as leaves.
    pub fn leaf_paths(&self) -> Vec<String> {
        self.iter()
            .filter(|node| node.children.is_empty())
            .map(|node| node.path.clone())
            .collect()
    }

    /// Number of nodes in this subtree, including itself.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order, left-to-right traversal of this subtree.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }
}

impl Drop for Node {
    // The derived drop glue recurses once per level; flatten descendants
    // onto the heap first so deep trees drop in constant stack.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

pub struct NodeIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(current.children.iter().rev());
        Some(current)
    }
}

/// Aggregate counts over a forest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForestSummary {
    pub roots: usize,
    pub directories: usize,
    pub files: usize,
    pub depth: usize,
}

impl ForestSummary {
    pub fn of(forest: &[Node]) -> Self {
        let (directories, files) = forest
            .iter()
            .flat_map(Node::iter)
            .fold((0, 0), |(dirs, files), node| {
                if node.is_dir() {
                    (dirs + 1, files)
                } else {
                    (dirs, files + 1)
                }
            });
        Self {
            roots: forest.len(),
            directories,
            files,
            depth: forest.iter().map(Node::depth).max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node {
            path: "src".into(),
            name: "src".into(),
            kind: EntryKind::Directory,
            children: vec![
                Node {
                    path: "src/lib".into(),
                    name: "lib".into(),
                    kind: EntryKind::Directory,
                    children: vec![Node::from_entry(&Entry::file("src/lib/mod.rs"))],
                },
                Node::from_entry(&Entry::file("src/main.rs")),
            ],
        }
    }

    #[test]
    fn given_git_types_when_mapping_then_commit_is_a_leaf() {
        assert_eq!(EntryKind::from_git_type("tree"), Some(EntryKind::Directory));
        assert_eq!(EntryKind::from_git_type("blob"), Some(EntryKind::File));
        assert_eq!(EntryKind::from_git_type("commit"), Some(EntryKind::File));
        assert_eq!(EntryKind::from_git_type("tag"), None);
    }

    #[test]
    fn given_nested_path_when_naming_then_uses_final_segment() {
        let entry = Entry::file("a/b/c.ts");
        assert_eq!(entry.name(), "c.ts");
        assert_eq!(entry.parent_path(), Some("a/b"));
    }

    #[test]
    fn given_tree_when_iterating_then_visits_pre_order() {
        let paths: Vec<_> = sample().iter().map(|n| n.path.clone()).collect();
        assert_eq!(paths, ["src", "src/lib", "src/lib/mod.rs", "src/main.rs"]);
    }

    #[test]
    fn given_tree_when_measuring_then_reports_depth_leaves_and_count() {
        let tree = sample();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaf_paths(), ["src/lib/mod.rs", "src/main.rs"]);
        assert_eq!(tree.count(), 4);
    }

    #[test]
    fn given_forest_when_summarizing_then_counts_kinds() {
        let forest = vec![sample(), Node::from_entry(&Entry::file("Cargo.toml"))];
        let summary = ForestSummary::of(&forest);
        assert_eq!(
            summary,
            ForestSummary {
                roots: 2,
                directories: 2,
                files: 3,
                depth: 3
            }
        );
    }

    #[test]
    fn given_long_chain_when_measuring_and_dropping_then_no_recursion() {
        let mut node = Node::from_entry(&Entry::dir("d"));
        for _ in 1..100_000 {
            node = Node {
                path: "d".into(),
                name: "d".into(),
                kind: EntryKind::Directory,
                children: vec![node],
            };
        }

        assert_eq!(node.depth(), 100_000);
        assert_eq!(ForestSummary::of(std::slice::from_ref(&node)).directories, 100_000);
    }

    #[test]
    fn given_node_when_serializing_then_uses_git_type_names() {
        let json = serde_json::to_value(Node::from_entry(&Entry::dir("docs"))).unwrap();
        assert_eq!(json["type"], "tree");
        assert_eq!(json["name"], "docs");
        assert!(json["children"].as_array().unwrap().is_empty());
    }
}
