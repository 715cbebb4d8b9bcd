/// Rectangular cell storage.
/// Flat `Vec` indexed by `y * cols + x`; coordinates outside
/// `[0, cols) × [0, rows)` are never handed out by any query here.

use super::cell::{Cell, Direction};

#[derive(Clone, Debug)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid with every cell fully walled. Callers validate dims.
    pub fn new(cols: usize, rows: usize) -> Self {
        let mut cells = Vec::with_capacity(cols * rows);
        for y in 0..rows {
            for x in 0..cols {
                cells.push(Cell::new(x, y));
            }
        }
        Grid { cols, rows, cells }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }

    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let i = self.index(x, y);
        &mut self.cells[i]
    }

    /// Coordinates one step from (x, y) toward `dir`, if still on the grid.
    pub fn step(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = dir.delta();
        let nx = x as i64 + dx as i64;
        let ny = y as i64 + dy as i64;
        if nx < 0 || ny < 0 {
            return None;
        }
        let (nx, ny) = (nx as usize, ny as usize);
        if self.in_bounds(nx, ny) {
            Some((nx, ny))
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_know_their_position() {
        let g = Grid::new(4, 3);
        assert_eq!(g.len(), 12);
        let c = g.cell(3, 2);
        assert_eq!((c.x, c.y), (3, 2));
    }

    #[test]
    fn step_stays_on_grid() {
        let g = Grid::new(3, 2);
        assert_eq!(g.step(0, 0, Direction::North), None);
        assert_eq!(g.step(0, 0, Direction::West), None);
        assert_eq!(g.step(0, 0, Direction::East), Some((1, 0)));
        assert_eq!(g.step(2, 1, Direction::East), None);
        assert_eq!(g.step(2, 1, Direction::South), None);
        assert_eq!(g.step(2, 1, Direction::North), Some((2, 0)));
    }

    #[test]
    fn one_by_one_has_no_neighbors() {
        let g = Grid::new(1, 1);
        for d in Direction::ALL {
            assert_eq!(g.step(0, 0, d), None);
        }
    }
}
