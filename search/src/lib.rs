//! Waypoint Search: pluggable graph search over caller-built node graphs.
//!
//! The caller builds a [`NodeGraph`] of [`State`] values, picks an
//! [`ExpansionOrder`], and runs a [`SearchEngine`] from a root node. The
//! engine reports a [`SearchOutcome`] together with an auditable
//! [`SearchTrace`].
//!
//! # Module dependency direction
//!
//! ```text
//! state ← graph ← fringe ← order ← policy ← engine
//!                                     trace ↗
//! ```
//!
//! # Key types
//!
//! - [`NodeGraph`] / [`NodeId`]: node arena with identity-keyed edges
//! - [`FringeEntry`]: a node reached along one path (`g`, `h`, parent)
//! - [`BreadthFirst`], [`DepthFirst`], [`BestFirst`]: built-in orders
//! - [`SearchPolicy`]: strategy selection by value or by name
//! - [`SearchTrace`]: expansion log, counters and canonical digest

#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod fringe;
pub mod graph;
pub mod order;
pub mod policy;
pub mod state;
pub mod trace;

pub use engine::{FoundPath, SearchEngine, SearchOutcome, SearchResult};
pub use error::SearchError;
pub use fringe::{EntryId, FrontierKey, Fringe, FringeEntry};
pub use graph::{Edge, Node, NodeGraph, NodeId};
pub use order::{BestFirst, BreadthFirst, DepthFirst, ExpansionOrder, Removal, SelfLoopGuard};
pub use policy::{OrderKind, SearchPolicy};
pub use state::State;
pub use trace::{content_digest, ExpandEvent, SearchMetadata, SearchTrace, Termination};
