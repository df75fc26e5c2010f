//! Shared fixtures for the waypoint benchmark suites.

use waypoint_harness::worlds::grid_maze::{build_maze, BuildMode, Grid, Maze, MazeConfig, BLOCKED, GOAL};

/// A `side` x `side` grid with a goal in the far corner.
///
/// Walls fall on a fixed diagonal pattern that always leaves the outer ring
/// open, so the goal is reachable from `(0, 0)`. Other cells cost 1 to 3.
///
/// # Panics
///
/// Panics if `side` is less than 2.
#[must_use]
pub fn walled_grid(side: usize) -> Grid {
    assert!(side >= 2, "grid needs at least two cells per side");
    let rows = (0..side)
        .map(|r| {
            (0..side)
                .map(|c| {
                    let border = r == 0 || c == 0 || r == side - 1 || c == side - 1;
                    if r == side - 1 && c == side - 1 {
                        GOAL
                    } else if !border && (r + 2 * c) % 5 == 0 {
                        BLOCKED
                    } else {
                        1 + ((r * 7 + c * 3) % 3) as i64
                    }
                })
                .collect()
        })
        .collect();
    Grid::from_rows(rows).expect("generated rows are rectangular")
}

/// Build the maze graph for [`walled_grid`] in `mode`, rooted at `(0, 0)`.
///
/// # Panics
///
/// Panics if the maze cannot be built; the generated grid always can.
#[must_use]
pub fn walled_maze(side: usize, mode: BuildMode) -> Maze {
    let config = MazeConfig {
        mode,
        ..MazeConfig::default()
    };
    build_maze(&walled_grid(side), &config).expect("start cell is in bounds")
}
