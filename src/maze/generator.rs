//! Randomized depth-first maze carving
//!
//! Recursive backtracker run on an explicit stack. Each frame holds a cell and
//! its neighbors in shuffled order; the top frame carves into the next
//! unvisited neighbor and pushes it, and is popped once its neighbors run out.
//! This visits cells in exactly the order the recursive formulation would while
//! keeping stack usage on the heap, so large grids cannot overflow the call stack.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::{Cell, Direction, Maze};
use crate::error::MazeError;

/// One pending cell of the depth-first walk
struct Frame {
    cell: Cell,
    neighbors: Vec<(Cell, Direction)>,
    next: usize,
}

/// Seeded perfect-maze generator
pub struct MazeGenerator {
    seed: u64,
    rng: Pcg32,
}

impl MazeGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the thread RNG
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a `cells × cells` perfect maze from a uniformly random start cell
    pub fn generate(&mut self, cells: usize) -> Result<Maze, MazeError> {
        let mut maze = Maze::new(cells)?;
        let start = Cell::new(
            self.rng.random_range(0..cells),
            self.rng.random_range(0..cells),
        );
        log::debug!("Carving {}x{} maze from {:?}", cells, cells, start);
        self.carve(&mut maze, start)?;
        Ok(maze)
    }

    /// Generate a `cells × cells` perfect maze starting the walk at `start`
    pub fn generate_from(&mut self, cells: usize, start: Cell) -> Result<Maze, MazeError> {
        let mut maze = Maze::new(cells)?;
        self.carve(&mut maze, start)?;
        Ok(maze)
    }

    /// Carve passages from `start` until every reachable cell is visited
    ///
    /// Re-entering an already visited start cell is a no-op.
    pub fn carve(&mut self, maze: &mut Maze, start: Cell) -> Result<(), MazeError> {
        if !maze.contains(start) {
            return Err(MazeError::invalid(format!(
                "start cell ({}, {}) is outside a {}x{} maze",
                start.row,
                start.column,
                maze.cells(),
                maze.cells()
            )));
        }
        if !maze.visit(start) {
            return Ok(());
        }

        let mut stack = vec![self.frame(maze, start)];
        while let Some(top) = stack.last_mut() {
            let Some(&(next, dir)) = top.neighbors.get(top.next) else {
                stack.pop();
                continue;
            };
            top.next += 1;

            if maze.is_visited(next) {
                continue;
            }
            maze.open(top.cell, dir);
            maze.visit(next);
            let frame = self.frame(maze, next);
            stack.push(frame);
        }
        Ok(())
    }

    /// In-bounds neighbors of `cell`, shuffled (Fisher-Yates)
    fn frame(&mut self, maze: &Maze, cell: Cell) -> Frame {
        let mut neighbors: Vec<(Cell, Direction)> = Direction::ALL
            .into_iter()
            .filter_map(|dir| maze.neighbor(cell, dir).map(|n| (n, dir)))
            .collect();
        neighbors.shuffle(&mut self.rng);
        Frame {
            cell,
            neighbors,
            next: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Union-find over open boundaries: false if any boundary closes a cycle
    fn is_acyclic(maze: &Maze) -> bool {
        let n = maze.cells();
        let mut parent: Vec<usize> = (0..n * n).collect();
        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }
        for row in 0..n {
            for col in 0..n {
                for dir in [Direction::Right, Direction::Down] {
                    let cell = Cell::new(row, col);
                    if !maze.is_open(cell, dir) {
                        continue;
                    }
                    let other = maze.neighbor(cell, dir).unwrap();
                    let a = find(&mut parent, row * n + col);
                    let b = find(&mut parent, other.row * n + other.column);
                    if a == b {
                        return false;
                    }
                    parent[a] = b;
                }
            }
        }
        true
    }

    #[test]
    fn test_two_by_two_has_one_closed_boundary() {
        for seed in 0..20 {
            let maze = MazeGenerator::new(seed).generate(2).unwrap();
            assert_eq!(maze.verticals().len(), 2);
            assert_eq!(maze.verticals()[0].len(), 1);
            assert_eq!(maze.horizontals().len(), 1);
            assert_eq!(maze.horizontals()[0].len(), 2);
            assert_eq!(maze.open_boundaries(), 3);
            assert_eq!(maze.closed_boundaries(), 1);
        }
    }

    #[test]
    fn test_rejects_small_grid() {
        let mut mazegen = MazeGenerator::new(1);
        assert!(matches!(
            mazegen.generate(1),
            Err(MazeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_start_outside_grid() {
        let mut mazegen = MazeGenerator::new(1);
        assert!(matches!(
            mazegen.generate_from(4, Cell::new(4, 0)),
            Err(MazeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = MazeGenerator::new(42).generate(12).unwrap();
        let b = MazeGenerator::new(42).generate(12).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeds_vary_the_maze() {
        let first = MazeGenerator::new(0).generate(10).unwrap();
        let differs = (1..10).any(|seed| MazeGenerator::new(seed).generate(10).unwrap() != first);
        assert!(differs);
    }

    #[test]
    fn test_carve_into_visited_start_is_noop() {
        let mut mazegen = MazeGenerator::new(3);
        let mut maze = mazegen.generate_from(5, Cell::new(2, 2)).unwrap();
        let before = maze.clone();
        mazegen.carve(&mut maze, Cell::new(0, 0)).unwrap();
        assert_eq!(maze, before);
    }

    #[test]
    fn test_large_grid_does_not_overflow() {
        let maze = MazeGenerator::new(7).generate_from(400, Cell::new(0, 0)).unwrap();
        assert!(maze.is_complete());
        assert_eq!(maze.open_boundaries(), 400 * 400 - 1);
    }

    proptest! {
        #[test]
        fn prop_generates_perfect_maze(cells in 2usize..24, seed in any::<u64>()) {
            let maze = MazeGenerator::new(seed).generate(cells).unwrap();

            prop_assert!(maze.is_complete());
            prop_assert_eq!(maze.open_boundaries(), cells * cells - 1);
            prop_assert_eq!(maze.reachable_from(Cell::new(0, 0)), cells * cells);
            prop_assert!(is_acyclic(&maze));
        }

        #[test]
        fn prop_any_start_cell_spans_grid(
            cells in 2usize..16,
            row in 0usize..16,
            col in 0usize..16,
            seed in any::<u64>(),
        ) {
            let start = Cell::new(row % cells, col % cells);
            let maze = MazeGenerator::new(seed).generate_from(cells, start).unwrap();

            prop_assert!(maze.is_complete());
            prop_assert_eq!(maze.reachable_from(start), cells * cells);
            prop_assert_eq!(
                maze.closed_boundaries(),
                2 * cells * (cells - 1) - (cells * cells - 1)
            );
        }
    }
}
