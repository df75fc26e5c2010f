//! `GridMaze`: a 2-D cell grid turned into a search graph.
//!
//! Cell values encode the terrain:
//!
//! | value | meaning                                   |
//! |-------|-------------------------------------------|
//! | `0`   | blocked, never placed                     |
//! | `4`   | goal, entered at cost 1, never expanded   |
//! | other | traversable, entered at cost = value      |
//!
//! Neighbours are visited in the fixed order up, left, right, down. Graph
//! construction goes through a [`MazeBuilder`] that owns the "already
//! placed" bookkeeping for one build and is dropped afterwards.

use std::collections::BTreeMap;

use waypoint_search::{NodeGraph, NodeId, State};

use crate::error::HarnessError;

/// Cell value for a blocked cell.
pub const BLOCKED: i64 = 0;

/// Cell value for a goal cell.
pub const GOAL: i64 = 4;

/// Edge cost for entering a goal cell, regardless of its encoding value.
pub const GOAL_ENTRY_COST: i64 = 1;

/// Neighbour offsets: up, left, right, down.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// A grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to `other`.
    #[must_use]
    pub fn manhattan(self, other: Cell) -> i64 {
        let d = self.row.abs_diff(other.row) + self.col.abs_diff(other.col);
        i64::try_from(d).unwrap_or(i64::MAX)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A rectangular grid of cell values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i64>,
}

impl Grid {
    /// Build a grid from row vectors.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::GridFormat`] if there are no rows, a row is
    /// empty, or rows differ in length.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, HarnessError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(HarnessError::GridFormat {
                line: 0,
                detail: "grid has no cells".into(),
            });
        }
        if let Some(i) = rows.iter().position(|r| r.len() != cols) {
            return Err(HarnessError::GridFormat {
                line: 0,
                detail: format!("row {i} has {} cells, expected {cols}", rows[i].len()),
            });
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Parse whitespace- or comma-separated integer rows.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::GridFormat`] for non-integer tokens and for
    /// the structural problems [`Grid::from_rows`] rejects.
    pub fn parse(text: &str) -> Result<Self, HarnessError> {
        let mut rows = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let row = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(|t| {
                    t.parse::<i64>().map_err(|e| HarnessError::GridFormat {
                        line: idx + 1,
                        detail: format!("bad cell {t:?}: {e}"),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at `cell`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<i64> {
        if cell.row < self.rows && cell.col < self.cols {
            self.cells.get(cell.row * self.cols + cell.col).copied()
        } else {
            None
        }
    }

    /// The in-bounds cell one step from `cell` along `(d_row, d_col)`.
    #[must_use]
    pub fn step(&self, cell: Cell, (d_row, d_col): (isize, isize)) -> Option<Cell> {
        let next = Cell::new(
            cell.row.checked_add_signed(d_row)?,
            cell.col.checked_add_signed(d_col)?,
        );
        self.get(next).map(|_| next)
    }

    /// In-bounds neighbours of `cell` in up, left, right, down order.
    pub fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        DIRECTIONS.iter().filter_map(move |&d| self.step(cell, d))
    }

    /// First goal cell in row-major order.
    #[must_use]
    pub fn first_goal(&self) -> Option<Cell> {
        let idx = self.cells.iter().position(|&v| v == GOAL)?;
        Some(Cell::new(idx / self.cols, idx % self.cols))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Cell::new(r, c)))
    }
}

/// A grid position, the target it estimates towards, and its goal flag.
///
/// Equality compares positions only.
#[derive(Debug, Clone, Copy)]
pub struct GridState {
    pub position: Cell,
    pub target: Cell,
    pub goal: bool,
}

impl PartialEq for GridState {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for GridState {}

impl State for GridState {
    fn is_goal(&self) -> bool {
        self.goal
    }

    fn heuristic(&self) -> i64 {
        self.position.manhattan(self.target)
    }
}

impl std::fmt::Display for GridState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.goal {
            write!(f, "cell {} (goal)", self.position)
        } else {
            write!(f, "cell {}", self.position)
        }
    }
}

/// How cells are linked into a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Depth-first placement from the start: each passable cell is placed
    /// once, under the first cell that discovers it. Produces a tree.
    #[default]
    FirstDiscovery,
    /// Every passable cell is a node with an edge to each passable neighbour.
    AllNeighbours,
}

/// Maze build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeConfig {
    pub start: Cell,
    /// Heuristic target; defaults to the grid's first goal cell, else `start`.
    pub target: Option<Cell>,
    pub mode: BuildMode,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            start: Cell::new(0, 0),
            target: None,
            mode: BuildMode::FirstDiscovery,
        }
    }
}

/// A built maze graph.
#[derive(Debug, Clone)]
pub struct Maze {
    pub graph: NodeGraph<GridState>,
    pub root: NodeId,
    pub target: Cell,
    /// Node placed for each cell.
    pub placed: BTreeMap<Cell, NodeId>,
}

impl Maze {
    /// Cells along a path of node ids.
    #[must_use]
    pub fn cells_of(&self, path: &[NodeId]) -> Vec<Cell> {
        self.graph
            .path_states(path)
            .into_iter()
            .map(|s| s.position)
            .collect()
    }
}

/// Construction context for one maze build.
pub struct MazeBuilder<'a> {
    grid: &'a Grid,
    target: Cell,
    graph: NodeGraph<GridState>,
    placed: BTreeMap<Cell, NodeId>,
}

impl<'a> MazeBuilder<'a> {
    #[must_use]
    pub fn new(grid: &'a Grid, target: Cell) -> Self {
        Self {
            grid,
            target,
            graph: NodeGraph::new(),
            placed: BTreeMap::new(),
        }
    }

    /// Whether `cell` already has a node.
    #[must_use]
    pub fn is_placed(&self, cell: Cell) -> bool {
        self.placed.contains_key(&cell)
    }

    /// Place a node for `cell`, or return the existing one.
    pub fn place(&mut self, cell: Cell) -> NodeId {
        if let Some(&id) = self.placed.get(&cell) {
            return id;
        }
        let id = self.graph.add_node(GridState {
            position: cell,
            target: self.target,
            goal: self.grid.get(cell) == Some(GOAL),
        });
        self.placed.insert(cell, id);
        id
    }

    /// Grow a placement tree from `start`, depth first.
    ///
    /// # Errors
    ///
    /// Propagates [`HarnessError::Search`] from edge insertion.
    pub fn grow_first_discovery(&mut self, start: Cell) -> Result<NodeId, HarnessError> {
        struct Frame {
            node: NodeId,
            cell: Cell,
            next: usize,
        }

        let root = self.place(start);
        let mut stack = Vec::new();
        if self.grid.get(start) != Some(GOAL) {
            stack.push(Frame {
                node: root,
                cell: start,
                next: 0,
            });
        }

        while let Some(frame) = stack.last_mut() {
            let Some(&dir) = DIRECTIONS.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let (parent, cell) = (frame.node, frame.cell);

            let Some(next) = self.grid.step(cell, dir) else {
                continue;
            };
            let Some(value) = self.grid.get(next).filter(|&v| v != BLOCKED) else {
                continue;
            };
            if self.is_placed(next) {
                continue;
            }

            let child = self.place(next);
            self.graph.add_child(parent, child, entry_cost(value))?;
            if value != GOAL {
                stack.push(Frame {
                    node: child,
                    cell: next,
                    next: 0,
                });
            }
        }
        Ok(root)
    }

    /// Place every passable cell and link each non-goal cell to its
    /// passable neighbours.
    ///
    /// # Errors
    ///
    /// Propagates [`HarnessError::Search`] from edge insertion.
    pub fn link_all_neighbours(&mut self, start: Cell) -> Result<NodeId, HarnessError> {
        let root = self.place(start);
        let grid = self.grid;
        for cell in grid.cells() {
            if grid.get(cell).is_some_and(|v| v != BLOCKED) {
                self.place(cell);
            }
        }
        for cell in grid.cells() {
            let Some(value) = grid.get(cell) else {
                continue;
            };
            if value == GOAL || (value == BLOCKED && cell != start) {
                continue;
            }
            let from = self.place(cell);
            for next in grid.neighbours(cell) {
                let Some(next_value) = grid.get(next).filter(|&v| v != BLOCKED) else {
                    continue;
                };
                let to = self.place(next);
                self.graph.add_child(from, to, entry_cost(next_value))?;
            }
        }
        Ok(root)
    }

    /// Finish the build.
    #[must_use]
    pub fn finish(self, root: NodeId) -> Maze {
        Maze {
            graph: self.graph,
            root,
            target: self.target,
            placed: self.placed,
        }
    }
}

fn entry_cost(value: i64) -> i64 {
    if value == GOAL {
        GOAL_ENTRY_COST
    } else {
        value
    }
}

/// Build a maze graph from `grid` under `config`.
///
/// # Errors
///
/// Returns [`HarnessError::StartOutOfBounds`] if the start cell is not in the
/// grid, or [`HarnessError::Search`] if edge insertion fails.
pub fn build_maze(grid: &Grid, config: &MazeConfig) -> Result<Maze, HarnessError> {
    if grid.get(config.start).is_none() {
        return Err(HarnessError::StartOutOfBounds { cell: config.start });
    }
    let target = config
        .target
        .or_else(|| grid.first_goal())
        .unwrap_or(config.start);

    let mut builder = MazeBuilder::new(grid, target);
    let root = match config.mode {
        BuildMode::FirstDiscovery => builder.grow_first_discovery(config.start)?,
        BuildMode::AllNeighbours => builder.link_all_neighbours(config.start)?,
    };
    let maze = builder.finish(root);
    tracing::debug!(
        mode = ?config.mode,
        nodes = maze.graph.len(),
        start = %config.start,
        target = %target,
        "maze built"
    );
    Ok(maze)
}
