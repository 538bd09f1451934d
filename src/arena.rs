use generational_arena::{Arena, Index};
use tracing::instrument;

/// Label given to the root of a tree created without an explicit value.
pub const DEFAULT_ROOT_LABEL: &str = ".";

/// Data payload for a tree node: the display value plus an optional
/// annotation rendered in brackets before it.
#[derive(Debug, Clone)]
pub struct NodeData<V> {
    /// Display value of the node; its textual form may span multiple lines
    pub value: V,
    /// Optional annotation, shown as `[meta]  value` when present
    pub meta: Option<V>,
}

/// Tree node in the arena-based hierarchy.
#[derive(Debug)]
pub struct TreeNode<V> {
    /// Value and annotation for this node
    pub data: NodeData<V>,
    /// Index of the parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
}

/// Arena-based tree of labeled nodes.
///
/// Nodes live in a generational arena and reference each other by [`Index`]:
/// children are exclusively owned through their parent's `children` list,
/// while the parent link is a non-owning back-reference. Sibling order is
/// insertion order and is the order rendering uses; nothing reorders it.
///
/// A node with no children is a leaf for rendering purposes; giving it
/// children turns it into a branch in place. Nodes are never removed
/// individually, the arena is dropped as a whole.
#[derive(Debug)]
pub struct Tree<V> {
    arena: Arena<TreeNode<V>>,
    root: Index,
}

impl<V> Tree<V> {
    /// Creates a tree whose root holds the given value.
    pub fn with_root(value: V) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            data: NodeData { value, meta: None },
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    fn insert(&mut self, data: NodeData<V>, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        }

        node_idx
    }

    /// Appends a leaf child under `parent`.
    ///
    /// The caller already holds the parent index, so nothing is returned;
    /// use [`Tree::append_branch`] when the new child itself needs children.
    #[instrument(level = "trace", skip(self, value))]
    pub fn append_node(&mut self, parent: Index, value: V) {
        self.insert(NodeData { value, meta: None }, Some(parent));
    }

    /// Appends an annotated leaf child under `parent`.
    #[instrument(level = "trace", skip(self, meta, value))]
    pub fn append_meta_node(&mut self, parent: Index, meta: V, value: V) {
        self.insert(
            NodeData {
                value,
                meta: Some(meta),
            },
            Some(parent),
        );
    }

    /// Appends a child under `parent` and returns its index for further
    /// nesting.
    #[instrument(level = "trace", skip(self, value))]
    pub fn append_branch(&mut self, parent: Index, value: V) -> Index {
        self.insert(NodeData { value, meta: None }, Some(parent))
    }

    /// Appends an annotated child under `parent` and returns its index.
    #[instrument(level = "trace", skip(self, meta, value))]
    pub fn append_meta_branch(&mut self, parent: Index, meta: V, value: V) -> Index {
        self.insert(
            NodeData {
                value,
                meta: Some(meta),
            },
            Some(parent),
        )
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<V>> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode<V>> {
        self.arena.get_mut(idx)
    }

    /// Index of the node created at construction.
    pub fn root(&self) -> Index {
        self.root
    }

    pub fn value(&self, node: Index) -> Option<&V> {
        self.get_node(node).map(|n| &n.data.value)
    }

    pub fn meta(&self, node: Index) -> Option<&V> {
        self.get_node(node).and_then(|n| n.data.meta.as_ref())
    }

    /// True when the node has no parent link.
    pub fn is_root(&self, node: Index) -> bool {
        self.get_node(node).is_some_and(|n| n.parent.is_none())
    }

    /// Final child of `node`, or None when childless.
    pub fn last_child(&self, node: Index) -> Option<Index> {
        self.get_node(node).and_then(|n| n.children.last().copied())
    }

    /// True when the node has no parent (vacuously last, it has no
    /// siblings) or is the final child of its parent.
    pub fn is_last_sibling(&self, node: Index) -> bool {
        match self.get_node(node).and_then(|n| n.parent) {
            Some(parent) => self.last_child(parent) == Some(node),
            None => true,
        }
    }

    /// Clears the parent link so the node renders as an independent subtree.
    ///
    /// No effect if the node is already rootless. The former parent keeps
    /// the node among its children, so rendering the original tree still
    /// shows the subtree in place.
    #[instrument(level = "trace", skip(self))]
    pub fn promote_to_root(&mut self, node: Index) {
        if let Some(n) = self.arena.get_mut(node) {
            n.parent = None;
        }
    }

    #[instrument(level = "trace", skip(self, value))]
    pub fn set_value(&mut self, node: Index, value: V) {
        if let Some(n) = self.arena.get_mut(node) {
            n.data.value = value;
        }
    }

    /// Replaces the annotation; `None` clears it.
    #[instrument(level = "trace", skip(self, meta))]
    pub fn set_meta(&mut self, node: Index, meta: Option<V>) {
        if let Some(n) = self.arena.get_mut(node) {
            n.data.meta = meta;
        }
    }

    /// Number of live nodes in the arena, promoted subtrees included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// All childless nodes reachable from the root, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self) -> Vec<Index> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(idx, _)| idx)
            .collect()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIter<'_, V> {
        TreeIter::new(self)
    }

    /// Invokes `visitor` on every descendant of `from`, exclusive of `from`
    /// itself: each child is visited, then its own children, before the
    /// next sibling. The walk is pre-order depth-first. (The operation this
    /// replaces was documented as breadth-first; the depth-first order is
    /// the contractual behavior and is kept.)
    #[instrument(level = "debug", skip(self, visitor))]
    pub fn visit_all<F>(&self, from: Index, mut visitor: F)
    where
        F: FnMut(Index, &TreeNode<V>),
    {
        self.visit_children(from, &mut visitor);
    }

    fn visit_children<F>(&self, from: Index, visitor: &mut F)
    where
        F: FnMut(Index, &TreeNode<V>),
    {
        let Some(node) = self.get_node(from) else {
            return;
        };
        for &child in &node.children {
            if let Some(child_node) = self.get_node(child) {
                visitor(child, child_node);
                if !child_node.children.is_empty() {
                    self.visit_children(child, visitor);
                }
            }
        }
    }
}

impl<V: PartialEq> Tree<V> {
    /// First descendant of `from` (pre-order, exclusive of `from`) whose
    /// value equals `value`, or None. Equality is the value type's
    /// [`PartialEq`], never identity. A stale or foreign index yields None.
    #[instrument(level = "debug", skip(self, value))]
    pub fn find_by_value(&self, from: Index, value: &V) -> Option<Index> {
        let node = self.get_node(from)?;
        for &child in &node.children {
            if let Some(child_node) = self.get_node(child) {
                if child_node.data.value == *value {
                    return Some(child);
                }
                if let Some(found) = self.find_by_value(child, value) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// First descendant of `from` (pre-order, exclusive of `from`) whose
    /// annotation equals `meta`, or None. Unannotated nodes never match.
    #[instrument(level = "debug", skip(self, meta))]
    pub fn find_by_meta(&self, from: Index, meta: &V) -> Option<Index> {
        let node = self.get_node(from)?;
        for &child in &node.children {
            if let Some(child_node) = self.get_node(child) {
                if child_node.data.meta.as_ref() == Some(meta) {
                    return Some(child);
                }
                if let Some(found) = self.find_by_meta(child, meta) {
                    return Some(found);
                }
            }
        }
        None
    }
}

impl Tree<String> {
    /// Creates a tree with the default placeholder root label.
    pub fn new() -> Self {
        Self::with_root(DEFAULT_ROOT_LABEL.to_string())
    }
}

impl Default for Tree<String> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TreeIter<'a, V> {
    tree: &'a Tree<V>,
    stack: Vec<Index>,
}

impl<'a, V> TreeIter<'a, V> {
    fn new(tree: &'a Tree<V>) -> Self {
        Self {
            tree,
            stack: vec![tree.root],
        }
    }
}

impl<'a, V> Iterator for TreeIter<'a, V> {
    type Item = (Index, &'a TreeNode<V>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
