/*
Text rendering of a forest via termtree.
Directories get a suffix (default `/`) so empty directories stay distinguishable from files.
 */
use itertools::Itertools;
use termtree::Tree;

use crate::domain::entities::Node;

pub const DEFAULT_DIR_SUFFIX: &str = "/";

pub trait TreeNodeConvert {
    fn to_tree_string(&self, dir_suffix: &str) -> Tree<String>;
}

impl TreeNodeConvert for Node {
    fn to_tree_string(&self, dir_suffix: &str) -> Tree<String> {
        labelled_tree(self, label(self, &self.name, dir_suffix), dir_suffix)
    }
}

fn label(node: &Node, text: &str, dir_suffix: &str) -> String {
    if node.is_dir() {
        format!("{}{}", text, dir_suffix)
    } else {
        text.to_string()
    }
}

fn labelled_tree(node: &Node, label: String, dir_suffix: &str) -> Tree<String> {
    // Recursively construct the children
    let leaves: Vec<_> = node
        .children
        .iter()
        .map(|c| c.to_tree_string(dir_suffix))
        .collect();

    Tree::new(label).with_leaves(leaves)
}

/// Render every root as its own tree, separated by nothing but the trees' own newlines.
///
/// Roots are labelled with their full path so orphans show where they belong.
pub fn render_forest(forest: &[Node], dir_suffix: &str) -> String {
    forest
        .iter()
        .map(|root| labelled_tree(root, label(root, &root.path, dir_suffix), dir_suffix).to_string())
        .join("")
}
