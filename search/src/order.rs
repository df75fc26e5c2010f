//! Expansion orders: where new frontier entries go and how the engine
//! takes the next one.
//!
//! All three strategies share one [`Fringe`]. Breadth-first and depth-first
//! only differ in which end they insert at (the engine always removes from
//! the head for them); best-first ranks entries by key and asks the engine
//! for minimum-key extraction instead.

use crate::fringe::{EntryId, Fringe};
use crate::graph::Edge;
use crate::state::State;

/// Which entry the engine removes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Take the head of the frontier.
    Head,
    /// Take the entry with the lowest [`crate::fringe::FrontierKey`].
    Best,
}

/// Frontier insertion policy.
pub trait ExpansionOrder<S: State> {
    /// Stable strategy name, echoed into logs and the audit trail.
    fn name(&self) -> &'static str;

    /// Removal discipline this insertion policy relies on.
    fn removal(&self) -> Removal {
        Removal::Head
    }

    /// Insert an entry for each of `children` with `parent` as parent.
    ///
    /// Returns the number of entries queued.
    fn add_to_fringe(&self, fringe: &mut Fringe<'_, S>, parent: EntryId, children: &[Edge]) -> usize;
}

impl<S: State, O: ExpansionOrder<S> + ?Sized> ExpansionOrder<S> for Box<O> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn removal(&self) -> Removal {
        (**self).removal()
    }

    fn add_to_fringe(&self, fringe: &mut Fringe<'_, S>, parent: EntryId, children: &[Edge]) -> usize {
        (**self).add_to_fringe(fringe, parent, children)
    }
}

/// FIFO: children are appended in edge order.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl<S: State> ExpansionOrder<S> for BreadthFirst {
    fn name(&self) -> &'static str {
        "breadth-first"
    }

    fn add_to_fringe(&self, fringe: &mut Fringe<'_, S>, parent: EntryId, children: &[Edge]) -> usize {
        for edge in children {
            let id = fringe.make_entry(edge.child, Some(parent), edge.cost);
            fringe.push_back(id);
        }
        children.len()
    }
}

/// LIFO: each child is pushed onto the head in edge order, so the last
/// child ends up nearest the head and is explored first.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl<S: State> ExpansionOrder<S> for DepthFirst {
    fn name(&self) -> &'static str {
        "depth-first"
    }

    fn add_to_fringe(&self, fringe: &mut Fringe<'_, S>, parent: EntryId, children: &[Edge]) -> usize {
        for edge in children {
            let id = fringe.make_entry(edge.child, Some(parent), edge.cost);
            fringe.push_front(id);
        }
        children.len()
    }
}

/// When best-first refuses to queue a child that looks like its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelfLoopGuard {
    /// Skip a child whose state equals the parent's state (`PartialEq`) and
    /// whose heuristic is strictly worse than the parent's.
    #[default]
    StateEquality,
    /// Queue every child.
    Off,
}

/// A*-style ordering: rank by `f = g + h`, extract the lowest key.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFirst {
    pub guard: SelfLoopGuard,
}

impl BestFirst {
    #[must_use]
    pub fn new(guard: SelfLoopGuard) -> Self {
        Self { guard }
    }
}

impl<S: State + PartialEq> ExpansionOrder<S> for BestFirst {
    fn name(&self) -> &'static str {
        "best-first"
    }

    fn removal(&self) -> Removal {
        Removal::Best
    }

    fn add_to_fringe(&self, fringe: &mut Fringe<'_, S>, parent: EntryId, children: &[Edge]) -> usize {
        let graph = fringe.graph();
        let Some((parent_node, parent_h)) = fringe.entry(parent).map(|e| (e.node, e.h_cost)) else {
            return 0;
        };
        let parent_state = graph.state(parent_node);

        let mut queued = 0;
        for edge in children {
            let id = fringe.make_entry(edge.child, Some(parent), edge.cost);
            if self.guard == SelfLoopGuard::StateEquality {
                let child_h = fringe.entry(id).map_or(0, |e| e.h_cost);
                let same_state = parent_state.is_some() && graph.state(edge.child) == parent_state;
                if same_state && child_h > parent_h {
                    continue;
                }
            }
            fringe.push_ranked(id);
            queued += 1;
        }
        queued
    }
}
