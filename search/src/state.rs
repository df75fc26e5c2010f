//! Problem state capability.

/// Problem-specific payload carried by every node.
///
/// Implemented by caller value types (integer chains, grid cells, ...). The
/// engine never inspects a state beyond these two calls.
pub trait State {
    /// Whether this state satisfies the problem's goal.
    fn is_goal(&self) -> bool;

    /// Estimated remaining cost to a goal (non-negative).
    ///
    /// Defaults to 0, which turns best-first ordering into uniform-cost
    /// ordering and is what breadth-first and depth-first callers use.
    fn heuristic(&self) -> i64 {
        0
    }
}
