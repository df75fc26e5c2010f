//! Waypoint Harness: caller-side worlds and run reports for the search core.
//!
//! The harness builds concrete node graphs (an integer chain, grid mazes),
//! hands them to `waypoint_search`, and renders or persists what comes back.
//! It implements no search logic of its own.

#![forbid(unsafe_code)]

pub mod error;
pub mod report;
pub mod worlds;

pub use error::HarnessError;
