//! Frontier records and the frontier sequence they are queued on.
//!
//! Entries live in a per-run arena and refer to their parent by [`EntryId`],
//! so the discovered path is an explicit back-index chain. Queued entries sit
//! either on a `VecDeque` (head/tail insertion, head removal) or on a
//! min-heap keyed by [`FrontierKey`] (ranked insertion, best removal). The
//! active [`crate::order::ExpansionOrder`] picks one side for a whole run.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::graph::{NodeGraph, NodeId};
use crate::state::State;

/// Index of a [`FringeEntry`] within one [`Fringe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

impl EntryId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A node reached along one particular path.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FringeEntry {
    /// The node this entry reaches.
    pub node: NodeId,
    /// The entry it was expanded from (`None` for the root entry).
    pub parent: Option<EntryId>,
    /// Cumulative edge cost from the root along this path.
    pub g_cost: i64,
    /// Heuristic of `node`'s state, captured at construction.
    pub h_cost: i64,
    /// Path length in edges (root = 0).
    pub depth: u32,
    /// Arena position, used for deterministic tie-breaking.
    pub creation_order: u64,
}

impl FringeEntry {
    /// Compute `f_cost = g_cost + h_cost`.
    #[must_use]
    pub fn f_cost(&self) -> i64 {
        self.g_cost.saturating_add(self.h_cost)
    }
}

/// Priority key: `(f_cost, depth, creation_order)`.
///
/// Lower `f_cost` first, then shallower depth, then older `creation_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub f_cost: i64,
    pub depth: u32,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            .then(self.depth.cmp(&other.depth))
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

impl From<&FringeEntry> for FrontierKey {
    fn from(entry: &FringeEntry) -> Self {
        Self {
            f_cost: entry.f_cost(),
            depth: entry.depth,
            creation_order: entry.creation_order,
        }
    }
}

/// Entry arena plus the queued frontier for one search run.
///
/// The arena keeps every entry constructed during the run, including popped,
/// duplicate and unqueued ones, because later entries may name any of them as
/// parent. Memory is released when the `Fringe` is dropped at the end of the
/// run.
pub struct Fringe<'g, S> {
    graph: &'g NodeGraph<S>,
    entries: Vec<FringeEntry>,
    queue: VecDeque<EntryId>,
    /// `BinaryHeap` is a max-heap; `Reverse` gives lowest key first.
    ranked: BinaryHeap<Reverse<(FrontierKey, EntryId)>>,
    high_water: usize,
}

impl<'g, S: State> Fringe<'g, S> {
    /// Create an empty frontier over `graph`.
    #[must_use]
    pub fn new(graph: &'g NodeGraph<S>) -> Self {
        Self {
            graph,
            entries: Vec::new(),
            queue: VecDeque::new(),
            ranked: BinaryHeap::new(),
            high_water: 0,
        }
    }

    /// The graph entries refer into.
    #[must_use]
    pub fn graph(&self) -> &'g NodeGraph<S> {
        self.graph
    }

    /// Construct an entry for `node` reached from `parent` over an edge of
    /// `edge_cost`. The entry is stored but not queued.
    ///
    /// `g_cost` is `edge_cost` for a root entry and `edge_cost + parent.g_cost`
    /// otherwise. A parent id that is not from this frontier is treated as
    /// absent.
    pub fn make_entry(&mut self, node: NodeId, parent: Option<EntryId>, edge_cost: i64) -> EntryId {
        let parent_entry = parent.and_then(|id| self.entries.get(id.0).map(|p| (id, p)));
        let (parent, g_cost, depth) = match parent_entry {
            Some((id, p)) => (Some(id), edge_cost.saturating_add(p.g_cost), p.depth + 1),
            None => (None, edge_cost, 0),
        };
        let h_cost = self.graph.state(node).map_or(0, State::heuristic);
        let id = EntryId(self.entries.len());
        self.entries.push(FringeEntry {
            node,
            parent,
            g_cost,
            h_cost,
            depth,
            creation_order: id.0 as u64,
        });
        id
    }

    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&FringeEntry> {
        self.entries.get(id.0)
    }

    /// Queue an entry at the tail.
    pub fn push_back(&mut self, id: EntryId) {
        self.queue.push_back(id);
        self.note_size();
    }

    /// Queue an entry at the head.
    pub fn push_front(&mut self, id: EntryId) {
        self.queue.push_front(id);
        self.note_size();
    }

    /// Remove the entry at the head.
    pub fn pop_front(&mut self) -> Option<EntryId> {
        self.queue.pop_front()
    }

    /// Queue an entry by its [`FrontierKey`] for [`Fringe::pop_best`].
    ///
    /// Ids not from this frontier are ignored.
    pub fn push_ranked(&mut self, id: EntryId) {
        if let Some(entry) = self.entries.get(id.0) {
            self.ranked.push(Reverse((FrontierKey::from(entry), id)));
            self.note_size();
        }
    }

    /// Remove the ranked entry with the lowest [`FrontierKey`].
    pub fn pop_best(&mut self) -> Option<EntryId> {
        self.ranked.pop().map(|Reverse((_, id))| id)
    }

    /// Queued entry ids: the deque head first, then ranked entries in key
    /// order.
    pub fn queued(&self) -> impl Iterator<Item = EntryId> + '_ {
        let mut ranked: Vec<(FrontierKey, EntryId)> = self.ranked.iter().map(|Reverse(item)| *item).collect();
        ranked.sort_unstable();
        self.queue
            .iter()
            .copied()
            .chain(ranked.into_iter().map(|(_, id)| id))
    }

    /// Current frontier length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len() + self.ranked.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty() && self.ranked.is_empty()
    }

    /// High-water mark of frontier length.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Number of entries constructed so far, queued or not.
    #[must_use]
    pub fn entries_created(&self) -> usize {
        self.entries.len()
    }

    /// Node ids from the root entry to `id`, inclusive.
    #[must_use]
    pub fn path_to(&self, id: EntryId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.entries.get(id.0);
        while let Some(entry) = current {
            path.push(entry.node);
            current = entry.parent.and_then(|p| self.entries.get(p.0));
        }
        path.reverse();
        path
    }

    fn note_size(&mut self) {
        self.high_water = self.high_water.max(self.len());
    }
}
