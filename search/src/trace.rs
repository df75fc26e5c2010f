//! `SearchTrace`: expansion-event audit log for one search run.
//!
//! The ordered list of [`ExpandEvent`]s is the decision record; the metadata
//! block carries the termination reason and run counters. Two runs of the
//! same order over the same graph produce byte-identical canonical JSON and
//! therefore the same [`SearchTrace::digest`].

use sha2::{Digest, Sha256};

use crate::graph::NodeId;
use crate::policy::SearchPolicy;

/// The complete audit trail of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTrace {
    /// Ordered expansion events. Empty when the policy disables recording.
    pub expansions: Vec<ExpandEvent>,
    /// Aggregate counters and termination.
    pub metadata: SearchMetadata,
}

/// One frontier pop that led to an expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandEvent {
    /// Total order of expansions (0-based).
    pub expansion_order: u64,
    /// The expanded node.
    pub node: NodeId,
    /// `g` of the entry that was popped.
    pub g_cost: i64,
    /// `f` of the entry that was popped.
    pub f_cost: i64,
    /// Path length of the popped entry.
    pub depth: u32,
    /// Outgoing edges handed to the expansion order.
    pub children_offered: u64,
    /// Entries the expansion order actually queued.
    pub children_queued: u64,
    /// Frontier length after insertion.
    pub frontier_len_after: u64,
}

/// Why the run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A goal node was popped.
    GoalReached { node: NodeId },
    /// The frontier emptied without a goal.
    FrontierExhausted,
}

/// Aggregate metadata for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMetadata {
    /// Name of the expansion order that ran.
    pub order: String,
    /// Policy echo, if the run was configured from a [`SearchPolicy`].
    pub policy: Option<SearchPolicy>,
    pub root: NodeId,
    pub termination: Termination,

    // Counters
    /// Nodes expanded (size of the visited set).
    pub total_expansions: u64,
    /// Pops that were honoured: every expansion plus the goal pop.
    pub total_extractions: u64,
    /// Pops discarded because their node was already expanded.
    pub total_duplicates_suppressed: u64,
    /// Entries constructed, including ones a strategy chose not to queue.
    pub total_entries_created: u64,
    pub frontier_high_water: u64,
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchTrace {
    /// Serialize to canonical JSON bytes (sorted keys, compact separators).
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        // serde_json's default map is ordered by key, so `to_vec` is canonical.
        serde_json::to_vec(&self.to_json_value())
    }

    /// Content digest of the canonical JSON: `"sha256:<hex>"`.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if serialization fails.
    pub fn digest(&self) -> Result<String, serde_json::Error> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(content_digest(&bytes))
    }

    /// Convert to a `serde_json::Value`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
        })
    }
}

/// SHA-256 digest of raw bytes in `"sha256:<hex>"` form.
#[must_use]
pub fn content_digest(bytes: &[u8]) -> String {
    format!("sha256:{}", hex::encode(Sha256::digest(bytes)))
}

fn node_to_json(id: NodeId) -> serde_json::Value {
    serde_json::json!(id.index())
}

fn expand_event_to_json(e: &ExpandEvent) -> serde_json::Value {
    serde_json::json!({
        "children_offered": e.children_offered,
        "children_queued": e.children_queued,
        "depth": e.depth,
        "expansion_order": e.expansion_order,
        "f_cost": e.f_cost,
        "frontier_len_after": e.frontier_len_after,
        "g_cost": e.g_cost,
        "node": node_to_json(e.node),
    })
}

fn termination_to_json(t: Termination) -> serde_json::Value {
    match t {
        Termination::GoalReached { node } => {
            serde_json::json!({"node": node_to_json(node), "type": "goal_reached"})
        }
        Termination::FrontierExhausted => serde_json::json!({"type": "frontier_exhausted"}),
    }
}

fn metadata_to_json(m: &SearchMetadata) -> serde_json::Value {
    serde_json::json!({
        "frontier_high_water": m.frontier_high_water,
        "order": m.order,
        "policy": m.policy.as_ref().map(SearchPolicy::to_json),
        "root": node_to_json(m.root),
        "termination": termination_to_json(m.termination),
        "total_duplicates_suppressed": m.total_duplicates_suppressed,
        "total_entries_created": m.total_entries_created,
        "total_expansions": m.total_expansions,
        "total_extractions": m.total_extractions,
    })
}
