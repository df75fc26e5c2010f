//! Node arena: states, identities, and outgoing edges.
//!
//! Node identity is the arena index ([`NodeId`]), never state equality. Two
//! nodes wrapping equal states are distinct unless the caller reuses one id.
//! The graph is built before a search and only borrowed immutably during it.

use crate::error::SearchError;
use crate::state::State;

/// Stable identity token of a node within one [`NodeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena index of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An outgoing edge: the child node and the cost of traversing to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub child: NodeId,
    pub cost: i64,
}

/// A vertex in the search graph.
#[derive(Debug, Clone)]
pub struct Node<S> {
    state: S,
    children: Vec<Edge>,
}

impl<S> Node<S> {
    #[must_use]
    pub fn new(state: S) -> Self {
        Self {
            state,
            children: Vec::new(),
        }
    }

    /// Add an edge to `child` unless one already exists.
    ///
    /// Duplicates are detected by child id only; the cost of a rejected edge
    /// is ignored. Returns whether the edge was inserted.
    pub fn add_child(&mut self, child: NodeId, cost: i64) -> bool {
        if self.children.iter().any(|e| e.child == child) {
            return false;
        }
        self.children.push(Edge { child, cost });
        true
    }

    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Outgoing edges in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Edge] {
        &self.children
    }
}

impl<S: State> Node<S> {
    #[must_use]
    pub fn is_goal(&self) -> bool {
        self.state.is_goal()
    }
}

/// Arena owning every node of one search problem.
#[derive(Debug, Clone)]
pub struct NodeGraph<S> {
    nodes: Vec<Node<S>>,
}

impl<S> NodeGraph<S> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Insert a new node and return its id.
    pub fn add_node(&mut self, state: S) -> NodeId {
        self.nodes.push(Node::new(state));
        NodeId(self.nodes.len() - 1)
    }

    /// Add an edge `parent -> child` with the given cost.
    ///
    /// Returns `Ok(false)` if `parent` already has an edge to `child`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownNode`] if either id is not in this graph.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId, cost: i64) -> Result<bool, SearchError> {
        self.check(child)?;
        let node = self
            .nodes
            .get_mut(parent.0)
            .ok_or(SearchError::UnknownNode { id: parent })?;
        Ok(node.add_child(child, cost))
    }

    /// Fail with [`SearchError::UnknownNode`] if `id` is not in this graph.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownNode`] for foreign ids.
    pub fn check(&self, id: NodeId) -> Result<(), SearchError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(SearchError::UnknownNode { id })
        }
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node<S>> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn state(&self, id: NodeId) -> Option<&S> {
        self.node(id).map(Node::state)
    }

    /// Outgoing edges of `id`; empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[Edge] {
        self.node(id).map(Node::children).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate `(id, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<S>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Number of distinct nodes reachable from `root`, including `root`.
    ///
    /// Returns 0 for an unknown root.
    #[must_use]
    pub fn reachable_from(&self, root: NodeId) -> usize {
        if self.check(root).is_err() {
            return 0;
        }
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![root];
        seen[root.0] = true;
        let mut count = 0;
        while let Some(id) = stack.pop() {
            count += 1;
            for edge in self.children(id) {
                if !seen[edge.child.0] {
                    seen[edge.child.0] = true;
                    stack.push(edge.child);
                }
            }
        }
        count
    }

    /// Resolve a path of ids to the states they wrap, skipping unknown ids.
    #[must_use]
    pub fn path_states(&self, path: &[NodeId]) -> Vec<&S> {
        path.iter().filter_map(|&id| self.state(id)).collect()
    }
}

impl<S> Default for NodeGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}
