//! Run reports: human-readable rendering and on-disk persistence.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   trace.json    canonical JSON of the run's SearchTrace
//!   digest.txt    ASCII digest of trace.json ("sha256:...")
//! ```

use std::fmt::Write as _;
use std::path::Path;

use waypoint_search::{content_digest, NodeGraph, SearchOutcome, SearchResult};

use crate::error::HarnessError;

const TRACE_FILENAME: &str = "trace.json";
const DIGEST_FILENAME: &str = "digest.txt";

/// Render an outcome the way a console caller would print it.
#[must_use]
pub fn render_text<S: std::fmt::Display>(result: &SearchResult, graph: &NodeGraph<S>) -> String {
    let mut out = String::new();
    match &result.outcome {
        SearchOutcome::Found(found) => {
            if let Some(goal) = graph.state(found.goal) {
                let _ = writeln!(out, "Found goal node: {goal}");
            }
            let _ = writeln!(out, "Cost: {}", found.total_cost);
            let _ = writeln!(out, "Nodes expanded: {}", found.nodes_expanded);
            let _ = writeln!(out, "Path:");
            for state in graph.path_states(&found.path) {
                let _ = writeln!(out, "- {state}");
            }
        }
        SearchOutcome::NotFound { nodes_expanded } => {
            let _ = writeln!(out, "No goal found");
            let _ = writeln!(out, "Nodes expanded: {nodes_expanded}");
        }
    }
    out
}

/// Write `trace.json` and `digest.txt` for `result` into `dir`.
///
/// Creates the directory if it does not exist. Returns the digest.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] on I/O failure or
/// [`HarnessError::Serialize`] if the trace cannot be serialized.
pub fn write_report_dir(result: &SearchResult, dir: &Path) -> Result<String, HarnessError> {
    std::fs::create_dir_all(dir).map_err(|e| HarnessError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;

    let bytes = result
        .trace
        .to_canonical_json_bytes()
        .map_err(|e| HarnessError::Serialize {
            detail: format!("{e}"),
        })?;
    let digest = content_digest(&bytes);

    write_atomic(&dir.join(TRACE_FILENAME), &bytes)?;
    write_atomic(&dir.join(DIGEST_FILENAME), digest.as_bytes())?;
    tracing::debug!(dir = %dir.display(), digest = %digest, "report written");
    Ok(digest)
}

/// Read a report directory back, checking the stored digest.
///
/// Returns the parsed trace JSON and its digest.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] if a file is missing,
/// [`HarnessError::DigestMismatch`] if `trace.json` was altered, and
/// [`HarnessError::Serialize`] if it is not valid JSON.
pub fn read_report_dir(dir: &Path) -> Result<(serde_json::Value, String), HarnessError> {
    let bytes = read_file(dir, TRACE_FILENAME)?;
    let stored = String::from_utf8_lossy(&read_file(dir, DIGEST_FILENAME)?)
        .trim()
        .to_string();

    let recomputed = content_digest(&bytes);
    if stored != recomputed {
        return Err(HarnessError::DigestMismatch { stored, recomputed });
    }

    let value = serde_json::from_slice(&bytes).map_err(|e| HarnessError::Serialize {
        detail: format!("{e}"),
    })?;
    Ok((value, stored))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Write bytes via temp file + rename in the same directory.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), HarnessError> {
    let dir = path.parent().ok_or_else(|| HarnessError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);

    std::fs::write(&temp_path, content).map_err(|e| HarnessError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| HarnessError::Io {
        detail: format!("rename {} -> {}: {e}", temp_path.display(), path.display()),
    })
}

fn read_file(dir: &Path, filename: &str) -> Result<Vec<u8>, HarnessError> {
    std::fs::read(dir.join(filename)).map_err(|e| HarnessError::Io {
        detail: format!("read {filename}: {e}"),
    })
}
