//! Harness error type.

use waypoint_search::SearchError;

use crate::worlds::grid_maze::Cell;

/// Failure building a world or persisting a run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// Grid text or rows were malformed (1-based line, 0 for structural).
    GridFormat { line: usize, detail: String },
    /// The requested start cell lies outside the grid.
    StartOutOfBounds { cell: Cell },
    /// Graph construction or search pre-flight failed.
    Search(SearchError),
    /// I/O error reading or writing a report directory.
    Io { detail: String },
    /// The trace could not be serialized.
    Serialize { detail: String },
    /// A report's stored digest does not match its trace bytes.
    DigestMismatch { stored: String, recomputed: String },
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GridFormat { line, detail } => write!(f, "grid format error (line {line}): {detail}"),
            Self::StartOutOfBounds { cell } => write!(f, "start cell {cell} is outside the grid"),
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::Serialize { detail } => write!(f, "serialization error: {detail}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SearchError> for HarnessError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}
