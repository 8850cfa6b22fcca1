use generational_arena::{Arena, Index};
use std::fmt;
use termtree::Tree;
use tracing::instrument;

use super::count::TaskCount;
use super::leaves::is_completed;
use super::line::{task_lines, Level, TaskLine};

/// Data payload for outline nodes.
#[derive(Debug, Clone, Copy)]
pub struct NodeData<'a> {
    pub line: TaskLine<'a>,
    /// Own `[x]` marker, ignoring ancestors
    pub completed: bool,
}

impl fmt::Display for NodeData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.line.raw.trim())
    }
}

/// Node in the arena-based outline.
#[derive(Debug)]
pub struct OutlineNode<'a> {
    pub data: NodeData<'a>,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes, in document order
    pub children: Vec<Index>,
}

/// Explicit tree view of a plan.
///
/// Built with an ancestor stack of strictly increasing levels: each new line
/// drops every open ancestor whose level is not below its own and hangs
/// under whatever remains on top. A plan may have several roots.
#[derive(Debug)]
pub struct OutlineTree<'a> {
    arena: Arena<OutlineNode<'a>>,
    roots: Vec<Index>,
    /// Every node in document order
    order: Vec<Index>,
}

impl Default for OutlineTree<'_> {
    fn default() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
            order: Vec::new(),
        }
    }
}

impl<'a> OutlineTree<'a> {
    #[instrument(level = "trace", skip(plan))]
    pub fn from_plan(plan: &'a str) -> Self {
        Self::from_lines(task_lines(plan))
    }

    pub fn from_lines(lines: impl IntoIterator<Item = TaskLine<'a>>) -> Self {
        let mut tree = Self::default();
        let mut lineage: Vec<(Index, Level)> = Vec::new();

        for line in lines {
            let keep = lineage
                .iter()
                .position(|&(_, level)| level >= line.level)
                .unwrap_or(lineage.len());
            lineage.truncate(keep);

            let parent = lineage.last().map(|&(idx, _)| idx);
            let idx = tree.insert_node(line, parent);
            lineage.push((idx, line.level));
        }

        tree
    }

    fn insert_node(&mut self, line: TaskLine<'a>, parent: Option<Index>) -> Index {
        let node = OutlineNode {
            data: NodeData {
                completed: is_completed(line.description),
                line,
            },
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent) => parent.children.push(node_idx),
            None => self.roots.push(node_idx),
        }
        self.order.push(node_idx);

        node_idx
    }

    pub fn get(&self, idx: Index) -> Option<&OutlineNode<'a>> {
        self.arena.get(idx)
    }

    pub fn parent(&self, idx: Index) -> Option<Index> {
        self.get(idx).and_then(|node| node.parent)
    }

    pub fn children(&self, idx: Index) -> &[Index] {
        self.get(idx).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Nodes in document order.
    pub fn iter(&self) -> impl Iterator<Item = (Index, &OutlineNode<'a>)> + '_ {
        self.order
            .iter()
            .filter_map(|&idx| self.arena.get(idx).map(|node| (idx, node)))
    }

    /// Number of nodes on the longest root-to-leaf path; 0 for an empty outline.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        1 + self
            .children(node_idx)
            .iter()
            .map(|&child| self.calculate_depth(child))
            .max()
            .unwrap_or(0)
    }

    /// Nodes without children, in document order.
    pub fn leaves(&self) -> Vec<Index> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// True if the node or any of its ancestors carries the `[x]` marker.
    pub fn is_effectively_done(&self, idx: Index) -> bool {
        let mut current = Some(idx);
        while let Some(node) = current.and_then(|i| self.get(i)) {
            if node.data.completed {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// Leaf totals; agrees with [`crate::domain::count_tasks`] on the same plan.
    pub fn count(&self) -> TaskCount {
        let leaves = self.leaves();
        let completed = leaves
            .iter()
            .filter_map(|&idx| self.get(idx))
            .filter(|node| node.data.completed)
            .count();
        TaskCount {
            total: leaves.len(),
            completed,
        }
    }

    /// Leaves still open once a finished parent marks its whole subtree done.
    pub fn outstanding(&self) -> usize {
        self.leaves()
            .into_iter()
            .filter(|&idx| !self.is_effectively_done(idx))
            .count()
    }

    /// Render the outline; several roots hang under a node named `label`.
    pub fn to_tree_string(&self, label: &str) -> Tree<String> {
        fn build_tree(outline: &OutlineTree<'_>, node_idx: Index) -> Tree<String> {
            let label = outline
                .get(node_idx)
                .map(|node| node.data.to_string())
                .unwrap_or_default();
            let leaves: Vec<_> = outline
                .children(node_idx)
                .iter()
                .map(|&child| build_tree(outline, child))
                .collect();
            Tree::new(label).with_leaves(leaves)
        }

        match self.roots.as_slice() {
            [root] => build_tree(self, *root),
            roots => Tree::new(label.to_string())
                .with_leaves(roots.iter().map(|&root| build_tree(self, root))),
        }
    }
}
