//! Arena staging area for tree construction.
//!
//! Nodes are created once in a generational arena and linked by index. The
//! path index only resolves parent references; it never owns a node. Once
//! linking is done, [`TreeArena::into_forest`] moves every node out of the
//! arena into its parent's `children`, so the returned forest owns the whole
//! graph and the arena is left empty.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::Node;
use crate::domain::ordering::NameOrder;

/// Tree node while staged in the arena.
#[derive(Debug)]
pub struct TreeNode {
    /// Node payload; its `children` stay empty until materialization
    pub data: Node,
    /// Index of parent node in the arena, None for roots
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena
    pub children: Vec<Index>,
}

#[derive(Debug, Default)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    /// Path to arena slot, for every staged node
    by_path: HashMap<String, Index>,
    /// Insertion order, so roots come out deterministically
    order: Vec<Index>,
}

impl TreeArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            by_path: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Stage a node. Returns `None` if a node with the same path is already staged.
    pub fn insert_node(&mut self, data: Node) -> Option<Index> {
        if self.by_path.contains_key(&data.path) {
            return None;
        }
        let path = data.path.clone();
        let idx = self.arena.insert(TreeNode {
            data,
            parent: None,
            children: Vec::new(),
        });
        self.by_path.insert(path, idx);
        self.order.push(idx);
        Some(idx)
    }

    /// Staged directory with exactly this path.
    pub fn directory(&self, path: &str) -> Option<Index> {
        self.by_path
            .get(path)
            .copied()
            .filter(|&idx| self.arena.get(idx).is_some_and(|n| n.data.is_dir()))
    }

    /// Attach `child` under `parent`. A node keeps its first parent.
    pub fn link(&mut self, child: Index, parent: Index) -> bool {
        if child == parent {
            return false;
        }
        match self.arena.get_mut(child) {
            Some(node) if node.parent.is_none() => node.parent = Some(parent),
            _ => return false,
        }
        match self.arena.get_mut(parent) {
            Some(node) => {
                node.children.push(child);
                true
            }
            None => false,
        }
    }

    /// Staged nodes that were never attached to a parent, in insertion order.
    pub fn roots(&self) -> Vec<Index> {
        self.order
            .iter()
            .copied()
            .filter(|&idx| self.arena.get(idx).is_some_and(|n| n.parent.is_none()))
            .collect()
    }

    /// Move all staged nodes into an owned, sorted forest.
    #[instrument(level = "trace", skip(self))]
    pub fn into_forest(mut self, order: NameOrder) -> Vec<Node> {
        let roots = self.roots();
        let mut forest: Vec<Node> = roots
            .into_iter()
            .filter_map(|idx| self.take(idx, order))
            .collect();
        order.sort(&mut forest);
        forest
    }

    /// Detach the subtree at `root` from the arena.
    ///
    /// Walks with an explicit stack so listing depth is bounded by heap, not by
    /// the thread's stack. A node is attached to its parent only after its own
    /// children are complete and sorted.
    fn take(&mut self, root: Index, order: NameOrder) -> Option<Node> {
        let TreeNode { data, children, .. } = self.arena.remove(root)?;
        let mut stack = vec![(data, children.into_iter())];
        loop {
            let (_, pending) = stack.last_mut()?;
            match pending.next() {
                Some(child) => {
                    if let Some(TreeNode { data, children, .. }) = self.arena.remove(child) {
                        stack.push((data, children.into_iter()));
                    }
                }
                None => {
                    let (mut done, _) = stack.pop()?;
                    order.sort(&mut done.children);
                    match stack.last_mut() {
                        Some((parent, _)) => parent.children.push(done),
                        None => return Some(done),
                    }
                }
            }
        }
    }
}
