/// Maze generation: randomized depth-first carving (iterative backtracker).
///
/// The generator produces a *perfect* maze — the open passages form a
/// spanning tree of the grid graph, so every cell is reachable from every
/// other through exactly one simple path, and a cols×rows maze has exactly
/// cols×rows − 1 openings.
///
/// An optional perturbation pass can re-close or re-open a fraction of
/// walls to tune difficulty. Re-closing is only accepted when a flood fill
/// confirms the exit is still reachable from the start; a closure that
/// would disconnect them is rolled back.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use super::cell::Direction;
use super::grid::Grid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("invalid maze dimensions {cols}x{rows}: need at least 1x1")]
    InvalidDimensions { cols: usize, rows: usize },
}

/// Post-generation difficulty tuning. Fractions are of the interior
/// wall/opening counts and are clamped to [0, 1].
#[derive(Clone, Copy, Debug)]
pub struct Perturbation {
    /// Fraction of openings to try re-closing (loses shortcuts).
    pub close_fraction: f64,
    /// Fraction of closed interior walls to open (adds loops).
    pub open_fraction: f64,
}

impl Perturbation {
    pub const NONE: Perturbation = Perturbation { close_fraction: 0.0, open_fraction: 0.0 };

    pub fn is_none(&self) -> bool {
        self.close_fraction <= 0.0 && self.open_fraction <= 0.0
    }
}

#[derive(Clone, Debug)]
pub struct Maze {
    grid: Grid,
    start: (usize, usize),
    exit: (usize, usize),
}

impl Maze {
    /// Carve a maze of the given size. The random source is injected so
    /// callers can seed it for reproducible layouts.
    pub fn generate(cols: usize, rows: usize, rng: &mut impl Rng) -> Result<Maze, MazeError> {
        if cols < 1 || rows < 1 {
            return Err(MazeError::InvalidDimensions { cols, rows });
        }

        let mut grid = Grid::new(cols, rows);
        let total = grid.len();
        let mut stack: Vec<(usize, usize)> = Vec::with_capacity(total);
        let mut current = (0, 0);
        grid.cell_mut(0, 0).visited = true;
        let mut visited_count = 1;

        while visited_count < total {
            let candidates = unvisited_neighbors(&grid, current);
            if !candidates.is_empty() {
                let (dir, next) = candidates[rng.gen_range(0..candidates.len())];
                stack.push(current);
                open_between(&mut grid, current, dir);
                grid.cell_mut(next.0, next.1).visited = true;
                visited_count += 1;
                current = next;
            } else if let Some(prev) = stack.pop() {
                current = prev;
            } else {
                // The walk can never strand cells on a connected grid, but
                // if it ever did, restart from one rather than spin forever.
                let unvisited = grid.iter().find(|c| !c.visited).map(|c| (c.x, c.y));
                match unvisited {
                    Some(pos) => {
                        grid.cell_mut(pos.0, pos.1).visited = true;
                        visited_count += 1;
                        current = pos;
                    }
                    None => break,
                }
            }
        }

        // The visited flags only mean something during carving.
        for y in 0..rows {
            for x in 0..cols {
                grid.cell_mut(x, y).visited = false;
            }
        }

        Ok(Maze {
            grid,
            start: (0, 0),
            exit: (cols - 1, rows - 1),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    pub fn exit(&self) -> (usize, usize) {
        self.exit
    }

    /// Reachability mask from `from`, walking open passages only.
    pub fn reachable_from(&self, from: (usize, usize)) -> Vec<bool> {
        let cols = self.grid.cols();
        let mut seen = vec![false; self.grid.len()];
        let mut queue = std::collections::VecDeque::new();
        seen[from.1 * cols + from.0] = true;
        queue.push_back(from);
        while let Some((x, y)) = queue.pop_front() {
            for dir in Direction::ALL {
                if self.grid.cell(x, y).blocks(dir) {
                    continue;
                }
                if let Some((nx, ny)) = self.grid.step(x, y, dir) {
                    let i = ny * cols + nx;
                    if !seen[i] {
                        seen[i] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
        seen
    }

    /// Every cell reachable from the start — the perfect-maze guarantee.
    pub fn fully_connected(&self) -> bool {
        self.reachable_from(self.start).iter().all(|&v| v)
    }

    pub fn exit_reachable(&self) -> bool {
        let (ex, ey) = self.exit;
        self.reachable_from(self.start)[ey * self.grid.cols() + ex]
    }

    /// Count of carved passages. Each interior opening is counted once
    /// (via its east/south side), so a spanning tree yields len() − 1.
    pub fn open_passage_count(&self) -> usize {
        let mut n = 0;
        for cell in self.grid.iter() {
            for dir in [Direction::East, Direction::South] {
                if !cell.blocks(dir) && self.grid.step(cell.x, cell.y, dir).is_some() {
                    n += 1;
                }
            }
        }
        n
    }

    /// Apply a difficulty perturbation in place. Start↔exit reachability
    /// is preserved: a closure that would sever them is undone.
    pub fn perturb(&mut self, rng: &mut impl Rng, tuning: Perturbation) {
        if tuning.is_none() {
            return;
        }
        let close_fraction = tuning.close_fraction.clamp(0.0, 1.0);
        let open_fraction = tuning.open_fraction.clamp(0.0, 1.0);

        if close_fraction > 0.0 {
            let mut openings = self.interior_walls(false);
            openings.shuffle(rng);
            let n = (openings.len() as f64 * close_fraction).round() as usize;
            for &(x, y, dir) in openings.iter().take(n) {
                close_between(&mut self.grid, (x, y), dir);
                if !self.exit_reachable() {
                    open_between(&mut self.grid, (x, y), dir);
                }
            }
        }

        if open_fraction > 0.0 {
            let mut walls = self.interior_walls(true);
            walls.shuffle(rng);
            let n = (walls.len() as f64 * open_fraction).round() as usize;
            for &(x, y, dir) in walls.iter().take(n) {
                // Opening a wall only ever adds connectivity.
                open_between(&mut self.grid, (x, y), dir);
            }
        }
    }

    /// Interior wall slots (east/south per cell, one entry per shared wall),
    /// filtered by whether the wall is currently present.
    fn interior_walls(&self, blocked: bool) -> Vec<(usize, usize, Direction)> {
        let mut out = Vec::new();
        for cell in self.grid.iter() {
            for dir in [Direction::East, Direction::South] {
                if self.grid.step(cell.x, cell.y, dir).is_some()
                    && cell.blocks(dir) == blocked
                {
                    out.push((cell.x, cell.y, dir));
                }
            }
        }
        out
    }
}

/// Neighbors that exist and have not been carved into yet, with the
/// direction that reaches them.
fn unvisited_neighbors(
    grid: &Grid,
    (x, y): (usize, usize),
) -> Vec<(Direction, (usize, usize))> {
    Direction::ALL
        .into_iter()
        .filter_map(|dir| {
            grid.step(x, y, dir)
                .filter(|&(nx, ny)| !grid.cell(nx, ny).visited)
                .map(|pos| (dir, pos))
        })
        .collect()
}

/// Clear the wall between a cell and its `dir` neighbor on both sides.
fn open_between(grid: &mut Grid, (x, y): (usize, usize), dir: Direction) {
    grid.cell_mut(x, y).walls.set(dir, false);
    if let Some((nx, ny)) = grid.step(x, y, dir) {
        grid.cell_mut(nx, ny).walls.set(dir.opposite(), false);
    }
}

/// Restore the wall between a cell and its `dir` neighbor on both sides.
fn close_between(grid: &mut Grid, (x, y): (usize, usize), dir: Direction) {
    grid.cell_mut(x, y).walls.set(dir, true);
    if let Some((nx, ny)) = grid.step(x, y, dir) {
        grid.cell_mut(nx, ny).walls.set(dir.opposite(), true);
    }
}
