//! Maze model
//!
//! A square grid of visited flags plus two matrices recording which shared
//! cell boundaries have been opened:
//! - `verticals[row][col]`: boundary between columns `col` and `col + 1`
//! - `horizontals[row][col]`: boundary between rows `row` and `row + 1`
//!
//! Every flag starts `false` and only ever flips to `true`.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MazeError;

/// A grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Axis-aligned step between neighboring cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Neighbor enumeration order used by the generator before shuffling
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// (row, column) offset of a single step
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// Location of one boundary flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Vertical { row: usize, col: usize },
    Horizontal { row: usize, col: usize },
}

/// Grid of visited cells and the open/closed state of every internal boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    cells: usize,
    grid: Vec<Vec<bool>>,
    verticals: Vec<Vec<bool>>,
    horizontals: Vec<Vec<bool>>,
}

impl Maze {
    /// Create an unvisited maze with every boundary closed
    ///
    /// Fails with [`MazeError::InvalidConfiguration`] when `cells < 2`.
    pub fn new(cells: usize) -> Result<Self, MazeError> {
        if cells < 2 {
            return Err(MazeError::invalid(format!(
                "maze needs at least 2 cells per side, got {}",
                cells
            )));
        }
        Ok(Self {
            cells,
            grid: vec![vec![false; cells]; cells],
            verticals: vec![vec![false; cells - 1]; cells],
            horizontals: vec![vec![false; cells]; cells - 1],
        })
    }

    /// Side length of the grid
    #[inline]
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Visited flags, `cells × cells`
    pub fn grid(&self) -> &[Vec<bool>] {
        &self.grid
    }

    /// Vertical boundary openness, `cells × (cells - 1)`
    pub fn verticals(&self) -> &[Vec<bool>] {
        &self.verticals
    }

    /// Horizontal boundary openness, `(cells - 1) × cells`
    pub fn horizontals(&self) -> &[Vec<bool>] {
        &self.horizontals
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.cells && cell.column < self.cells
    }

    pub fn is_visited(&self, cell: Cell) -> bool {
        self.contains(cell) && self.grid[cell.row][cell.column]
    }

    /// True once every cell has been visited
    pub fn is_complete(&self) -> bool {
        self.grid.iter().flatten().all(|&v| v)
    }

    /// The in-bounds cell one step away, if any
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let (dr, dc) = dir.offset();
        let row = cell.row.checked_add_signed(dr)?;
        let column = cell.column.checked_add_signed(dc)?;
        let next = Cell::new(row, column);
        self.contains(next).then_some(next)
    }

    /// Whether the boundary on the `dir` side of `cell` is open
    ///
    /// Outer edges of the grid are always closed.
    pub fn is_open(&self, cell: Cell, dir: Direction) -> bool {
        match self.boundary(cell, dir) {
            Some(Boundary::Vertical { row, col }) => self.verticals[row][col],
            Some(Boundary::Horizontal { row, col }) => self.horizontals[row][col],
            None => false,
        }
    }

    /// Neighbors reachable from `cell` through open boundaries
    pub fn passages(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&dir| self.is_open(cell, dir))
            .filter_map(move |dir| self.neighbor(cell, dir))
    }

    /// Number of open internal boundaries
    pub fn open_boundaries(&self) -> usize {
        self.verticals
            .iter()
            .chain(self.horizontals.iter())
            .flatten()
            .filter(|&&open| open)
            .count()
    }

    /// Number of closed internal boundaries (one wall obstacle each)
    pub fn closed_boundaries(&self) -> usize {
        2 * self.cells * (self.cells - 1) - self.open_boundaries()
    }

    /// Count of cells reachable from `start` through open boundaries (including `start`)
    pub fn reachable_from(&self, start: Cell) -> usize {
        if !self.contains(start) {
            return 0;
        }
        let mut seen = vec![vec![false; self.cells]; self.cells];
        let mut queue = VecDeque::from([start]);
        seen[start.row][start.column] = true;
        let mut count = 0;

        while let Some(cell) = queue.pop_front() {
            count += 1;
            for next in self.passages(cell) {
                if !seen[next.row][next.column] {
                    seen[next.row][next.column] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    /// Mark a cell visited; returns false if it already was
    pub(crate) fn visit(&mut self, cell: Cell) -> bool {
        let slot = &mut self.grid[cell.row][cell.column];
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    /// Open the boundary on the `dir` side of `cell`
    pub(crate) fn open(&mut self, cell: Cell, dir: Direction) {
        match self.boundary(cell, dir) {
            Some(Boundary::Vertical { row, col }) => self.verticals[row][col] = true,
            Some(Boundary::Horizontal { row, col }) => self.horizontals[row][col] = true,
            None => log::warn!("No boundary {:?} of {:?} to open", dir, cell),
        }
    }

    fn boundary(&self, cell: Cell, dir: Direction) -> Option<Boundary> {
        if !self.contains(cell) {
            return None;
        }
        let Cell { row, column: col } = cell;
        match dir {
            Direction::Left if col > 0 => Some(Boundary::Vertical { row, col: col - 1 }),
            Direction::Right if col + 1 < self.cells => Some(Boundary::Vertical { row, col }),
            Direction::Up if row > 0 => Some(Boundary::Horizontal { row: row - 1, col }),
            Direction::Down if row + 1 < self.cells => Some(Boundary::Horizontal { row, col }),
            _ => None,
        }
    }
}

/// ASCII rendering, one `+---+` box per cell
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+")?;
        for _ in 0..self.cells {
            write!(f, "---+")?;
        }
        writeln!(f)?;

        for row in 0..self.cells {
            write!(f, "|")?;
            for col in 0..self.cells {
                let east = if self.is_open(Cell::new(row, col), Direction::Right) {
                    " "
                } else {
                    "|"
                };
                write!(f, "   {}", east)?;
            }
            writeln!(f)?;

            write!(f, "+")?;
            for col in 0..self.cells {
                let south = if self.is_open(Cell::new(row, col), Direction::Down) {
                    "   "
                } else {
                    "---"
                };
                write!(f, "{}+", south)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
