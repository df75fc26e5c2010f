//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. An unreachable goal is
//! not an error: it is reported as [`crate::engine::SearchOutcome::NotFound`]
//! together with the full audit trail.

use crate::graph::NodeId;

/// Typed failure for graph construction and pre-flight search validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A node id does not belong to the graph it was used with.
    UnknownNode { id: NodeId },
    /// An expansion order name did not match any known strategy.
    UnknownOrder { name: String },
    /// A policy document was malformed.
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode { id } => write!(f, "unknown node id {id}"),
            Self::UnknownOrder { name } => write!(f, "unknown expansion order: {name}"),
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
