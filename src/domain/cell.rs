/// Cells and their wall flags.
/// A wall is stored on *both* cells it separates; carving always clears
/// the pair together so the two views never disagree.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit step in grid coordinates (x grows east, y grows south).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// The side a neighbor sees this wall from.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// Four independent wall flags. `true` = impassable.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Walls {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl Walls {
    /// All four walls present — the state every cell starts in.
    pub fn closed() -> Self {
        Walls { north: true, east: true, south: true, west: true }
    }

    pub fn is_set(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    pub fn set(&mut self, dir: Direction, blocked: bool) {
        match dir {
            Direction::North => self.north = blocked,
            Direction::East => self.east = blocked,
            Direction::South => self.south = blocked,
            Direction::West => self.west = blocked,
        }
    }

    /// Number of open (carved) sides.
    pub fn open_count(&self) -> usize {
        Direction::ALL.iter().filter(|d| !self.is_set(**d)).count()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub walls: Walls,
    /// Transient marker, only meaningful while the generator runs.
    pub(crate) visited: bool,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Cell { x, y, walls: Walls::closed(), visited: false }
    }

    /// Does this cell's own wall block movement toward `dir`?
    pub fn blocks(&self, dir: Direction) -> bool {
        self.walls.is_set(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involutive() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn delta_matches_opposite() {
        for d in Direction::ALL {
            let (dx, dy) = d.delta();
            let (ox, oy) = d.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn new_cell_is_fully_walled() {
        let c = Cell::new(2, 3);
        for d in Direction::ALL {
            assert!(c.blocks(d));
        }
        assert_eq!(c.walls.open_count(), 0);
    }

    #[test]
    fn set_clears_one_side_only() {
        let mut w = Walls::closed();
        w.set(Direction::East, false);
        assert!(!w.is_set(Direction::East));
        assert!(w.is_set(Direction::West));
        assert_eq!(w.open_count(), 1);
    }
}
