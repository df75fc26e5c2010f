//! Caller-side worlds: concrete states and the graph builders that wire them.

pub mod grid_maze;
pub mod int_chain;
