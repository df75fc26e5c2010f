//! `IntChain`: integer-valued states wired into a small hand-built graph.
//!
//! The demo graph is a chain `0 -> 1 -> 2 -> 3 -> 4` hanging off the root,
//! plus a direct root edge to a goal node `5`. Every edge costs 1.

use waypoint_search::{NodeGraph, NodeId, SearchError, State};

/// An integer payload with an explicit goal flag and no heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntState {
    pub value: i64,
    pub goal: bool,
}

impl IntState {
    #[must_use]
    pub const fn new(value: i64, goal: bool) -> Self {
        Self { value, goal }
    }
}

impl State for IntState {
    fn is_goal(&self) -> bool {
        self.goal
    }
}

impl std::fmt::Display for IntState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.goal {
            write!(f, "int({}, goal)", self.value)
        } else {
            write!(f, "int({})", self.value)
        }
    }
}

/// Create a node for `value` and hang it off `parent` with cost 1.
///
/// # Errors
///
/// Returns [`SearchError::UnknownNode`] if `parent` is not in `graph`.
pub fn add_int_child(
    graph: &mut NodeGraph<IntState>,
    parent: NodeId,
    value: i64,
    goal: bool,
) -> Result<NodeId, SearchError> {
    graph.check(parent)?;
    let child = graph.add_node(IntState::new(value, goal));
    graph.add_child(parent, child, 1)?;
    Ok(child)
}

/// Which of the root's two edges is inserted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootEdgeOrder {
    /// Chain edge first, then the goal edge.
    ChainFirst,
    /// Goal edge first, then the chain edge.
    GoalFirst,
}

/// The demo graph and its two landmark nodes.
#[derive(Debug, Clone)]
pub struct ChainDemo {
    pub graph: NodeGraph<IntState>,
    pub root: NodeId,
    pub goal: NodeId,
    /// Chain nodes `1..=4`, root side first.
    pub chain: Vec<NodeId>,
}

/// Build the demo graph with the root's edges in the given order.
///
/// # Errors
///
/// Propagates [`SearchError`] from graph construction; it cannot occur for
/// the fixed shape built here.
pub fn demo_graph(order: RootEdgeOrder) -> Result<ChainDemo, SearchError> {
    let mut graph = NodeGraph::new();
    let root = graph.add_node(IntState::new(0, false));
    let goal = graph.add_node(IntState::new(5, true));

    if order == RootEdgeOrder::GoalFirst {
        graph.add_child(root, goal, 1)?;
    }
    let mut chain = Vec::with_capacity(4);
    let mut tail = root;
    for value in 1..=4 {
        tail = add_int_child(&mut graph, tail, value, false)?;
        chain.push(tail);
    }
    if order == RootEdgeOrder::ChainFirst {
        graph.add_child(root, goal, 1)?;
    }

    Ok(ChainDemo {
        graph,
        root,
        goal,
        chain,
    })
}
