//! Search entry point and traversal loop.

use std::collections::BTreeSet;

use crate::error::SearchError;
use crate::fringe::{EntryId, Fringe};
use crate::graph::{Node, NodeGraph, NodeId};
use crate::order::{ExpansionOrder, Removal};
use crate::policy::SearchPolicy;
use crate::state::State;
use crate::trace::{ExpandEvent, SearchMetadata, SearchTrace, Termination};

/// A goal that was reached, with the path that reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundPath {
    /// The goal node.
    pub goal: NodeId,
    /// `g` of the goal entry.
    pub total_cost: i64,
    /// Size of the visited set when the goal was popped.
    pub nodes_expanded: u64,
    /// Root to goal, inclusive.
    pub path: Vec<NodeId>,
}

/// Outcome of one search run. Not finding a goal is an ordinary outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(FoundPath),
    NotFound { nodes_expanded: u64 },
}

impl SearchOutcome {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    #[must_use]
    pub fn nodes_expanded(&self) -> u64 {
        match self {
            Self::Found(found) => found.nodes_expanded,
            Self::NotFound { nodes_expanded } => *nodes_expanded,
        }
    }

    #[must_use]
    pub fn total_cost(&self) -> Option<i64> {
        match self {
            Self::Found(found) => Some(found.total_cost),
            Self::NotFound { .. } => None,
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&[NodeId]> {
        match self {
            Self::Found(found) => Some(&found.path),
            Self::NotFound { .. } => None,
        }
    }
}

/// Result of a search execution: the outcome plus its audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    pub trace: SearchTrace,
}

impl SearchResult {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.trace.metadata.termination,
            Termination::GoalReached { .. }
        )
    }

    /// States along the found path, root first. Empty when nothing was found.
    #[must_use]
    pub fn path_states<'g, S>(&self, graph: &'g NodeGraph<S>) -> Vec<&'g S> {
        self.outcome
            .path()
            .map(|path| graph.path_states(path))
            .unwrap_or_default()
    }
}

/// Runs searches under one expansion order.
///
/// The engine holds no per-run state; each [`SearchEngine::search`] call owns
/// its own frontier and visited set.
#[derive(Debug, Clone)]
pub struct SearchEngine<O> {
    order: O,
    policy: Option<SearchPolicy>,
    record_expansions: bool,
}

impl<O> SearchEngine<O> {
    /// Engine around `order`, recording expansion events.
    #[must_use]
    pub fn new(order: O) -> Self {
        Self {
            order,
            policy: None,
            record_expansions: true,
        }
    }

    /// Enable or disable per-expansion events in the audit trail.
    #[must_use]
    pub fn record_expansions(mut self, record: bool) -> Self {
        self.record_expansions = record;
        self
    }

    #[must_use]
    pub fn order(&self) -> &O {
        &self.order
    }
}

impl<S: State + PartialEq + 'static> SearchEngine<Box<dyn ExpansionOrder<S>>> {
    /// Engine configured from a [`SearchPolicy`]; the policy is echoed into
    /// every trace this engine produces.
    #[must_use]
    pub fn from_policy(policy: &SearchPolicy) -> Self {
        Self {
            order: policy.build_order(),
            policy: Some(*policy),
            record_expansions: policy.record_expansions,
        }
    }
}

impl<O> SearchEngine<O> {
    /// Search `graph` from `root` until a goal is popped or the frontier
    /// empties.
    ///
    /// Each node is expanded at most once, so the run terminates on any
    /// finite graph, cyclic or not.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownNode`] if `root` is not in `graph`. No
    /// search step is taken in that case.
    pub fn search<S: State>(&self, graph: &NodeGraph<S>, root: NodeId) -> Result<SearchResult, SearchError>
    where
        O: ExpansionOrder<S>,
    {
        graph.check(root)?;

        let order_name = self.order.name();
        let removal = self.order.removal();
        tracing::debug!(order = order_name, root = %root, nodes = graph.len(), "search started");

        let mut fringe = Fringe::new(graph);
        let root_entry = fringe.make_entry(root, None, 0);
        match removal {
            Removal::Head => fringe.push_back(root_entry),
            Removal::Best => fringe.push_ranked(root_entry),
        }

        let mut visited: BTreeSet<NodeId> = BTreeSet::new();
        let mut expansions: Vec<ExpandEvent> = Vec::new();
        let mut total_extractions: u64 = 0;
        let mut total_duplicates_suppressed: u64 = 0;
        let mut goal_entry: Option<EntryId> = None;

        loop {
            let next = match removal {
                Removal::Head => fringe.pop_front(),
                Removal::Best => fringe.pop_best(),
            };
            let Some(entry_id) = next else {
                break;
            };
            let Some(entry) = fringe.entry(entry_id).cloned() else {
                continue;
            };

            // First extraction of a node wins; later paths to it are dropped.
            if visited.contains(&entry.node) {
                total_duplicates_suppressed += 1;
                continue;
            }
            total_extractions += 1;

            if graph.node(entry.node).is_some_and(Node::is_goal) {
                goal_entry = Some(entry_id);
                break;
            }

            visited.insert(entry.node);
            let children = graph.children(entry.node);
            let queued = self.order.add_to_fringe(&mut fringe, entry_id, children);
            tracing::trace!(
                node = %entry.node,
                g = entry.g_cost,
                f = entry.f_cost(),
                queued,
                frontier = fringe.len(),
                "expanded"
            );

            if self.record_expansions {
                expansions.push(ExpandEvent {
                    expansion_order: visited.len() as u64 - 1,
                    node: entry.node,
                    g_cost: entry.g_cost,
                    f_cost: entry.f_cost(),
                    depth: entry.depth,
                    children_offered: children.len() as u64,
                    children_queued: queued as u64,
                    frontier_len_after: fringe.len() as u64,
                });
            }
        }

        let nodes_expanded = visited.len() as u64;
        let found = goal_entry.and_then(|id| fringe.entry(id).map(|e| (id, e.node, e.g_cost)));
        let (outcome, termination) = match found {
            Some((id, goal, total_cost)) => (
                SearchOutcome::Found(FoundPath {
                    goal,
                    total_cost,
                    nodes_expanded,
                    path: fringe.path_to(id),
                }),
                Termination::GoalReached { node: goal },
            ),
            None => (
                SearchOutcome::NotFound { nodes_expanded },
                Termination::FrontierExhausted,
            ),
        };

        tracing::debug!(
            order = order_name,
            found = outcome.is_found(),
            cost = ?outcome.total_cost(),
            nodes_expanded,
            duplicates = total_duplicates_suppressed,
            frontier_high_water = fringe.high_water(),
            "search finished"
        );

        let metadata = SearchMetadata {
            order: order_name.to_string(),
            policy: self.policy,
            root,
            termination,
            total_expansions: nodes_expanded,
            total_extractions,
            total_duplicates_suppressed,
            total_entries_created: fringe.entries_created() as u64,
            frontier_high_water: fringe.high_water() as u64,
        };

        Ok(SearchResult {
            outcome,
            trace: SearchTrace {
                expansions,
                metadata,
            },
        })
    }
}
