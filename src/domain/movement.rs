/// Move validation against per-cell wall state.
/// Rejected moves are ordinary outcomes, not errors: pressing into a wall
/// is how the game is played.

use super::cell::Direction;
use super::maze::Maze;

/// Where the player currently stands. Always in bounds; only accepted
/// moves ever change it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PlayerState {
    pub x: usize,
    pub y: usize,
}

impl PlayerState {
    pub fn at_start(maze: &Maze) -> Self {
        let (x, y) = maze.start();
        PlayerState { x, y }
    }

    pub fn pos(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// Move accepted; the caller applies the new position.
    Accepted { x: usize, y: usize },
    /// Target is walled off or outside the grid. No state change.
    Blocked,
}

/// Validate one step from `(x, y)` toward `dir`. Pure: the caller owns
/// the player state and applies accepted positions itself.
pub fn attempt_move(maze: &Maze, x: usize, y: usize, dir: Direction) -> MoveOutcome {
    if maze.grid().cell(x, y).blocks(dir) {
        return MoveOutcome::Blocked;
    }
    match maze.grid().step(x, y, dir) {
        Some((nx, ny)) => MoveOutcome::Accepted { x: nx, y: ny },
        None => MoveOutcome::Blocked,
    }
}

/// Win predicate, evaluated by the caller after every accepted move.
pub fn has_reached_exit(pos: (usize, usize), maze: &Maze) -> bool {
    pos == maze.exit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::maze::MazeError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn maze(cols: usize, rows: usize, seed: u64) -> Maze {
        let mut rng = StdRng::seed_from_u64(seed);
        Maze::generate(cols, rows, &mut rng).unwrap()
    }

    /// A 1×2 maze has exactly one carved passage: north/south between
    /// the two cells. Handy for exact wall expectations.
    fn corridor() -> Maze {
        maze(1, 2, 0)
    }

    #[test]
    fn open_side_is_accepted() {
        let m = corridor();
        assert_eq!(
            attempt_move(&m, 0, 0, Direction::South),
            MoveOutcome::Accepted { x: 0, y: 1 }
        );
    }

    #[test]
    fn walled_side_is_blocked() {
        let m = corridor();
        assert_eq!(attempt_move(&m, 0, 0, Direction::East), MoveOutcome::Blocked);
        assert_eq!(attempt_move(&m, 0, 0, Direction::West), MoveOutcome::Blocked);
    }

    #[test]
    fn grid_edge_is_blocked() {
        let m = corridor();
        assert_eq!(attempt_move(&m, 0, 0, Direction::North), MoveOutcome::Blocked);
        assert_eq!(attempt_move(&m, 0, 1, Direction::South), MoveOutcome::Blocked);
    }

    #[test]
    fn rejection_is_repeatable() {
        let m = corridor();
        let first = attempt_move(&m, 0, 0, Direction::North);
        for _ in 0..10 {
            assert_eq!(attempt_move(&m, 0, 0, Direction::North), first);
        }
    }

    #[test]
    fn exit_predicate() {
        let m = maze(5, 5, 9);
        assert!(has_reached_exit(m.exit(), &m));
        assert!(!has_reached_exit(m.start(), &m));
        let (ex, ey) = m.exit();
        assert!(!has_reached_exit((ex - 1, ey), &m));
    }

    #[test]
    fn exit_is_reachable_by_accepted_moves() {
        // BFS over attempt_move itself: the validator must expose a
        // finite accepted path from start to exit.
        for seed in 0..5 {
            let m = maze(11, 7, seed);
            let cols = m.grid().cols();
            let mut seen = vec![false; m.grid().len()];
            let mut queue = std::collections::VecDeque::new();
            seen[0] = true;
            queue.push_back(m.start());
            let mut found = false;
            while let Some((x, y)) = queue.pop_front() {
                if has_reached_exit((x, y), &m) {
                    found = true;
                    break;
                }
                for dir in Direction::ALL {
                    if let MoveOutcome::Accepted { x: nx, y: ny } =
                        attempt_move(&m, x, y, dir)
                    {
                        if !seen[ny * cols + nx] {
                            seen[ny * cols + nx] = true;
                            queue.push_back((nx, ny));
                        }
                    }
                }
            }
            assert!(found, "seed {seed}");
        }
    }

    #[test]
    fn player_starts_at_maze_start() {
        let m = maze(5, 5, 1);
        let p = PlayerState::at_start(&m);
        assert_eq!(p.pos(), m.start());
    }

    #[test]
    fn invalid_dims_never_reach_movement() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            Maze::generate(0, 0, &mut rng),
            Err(MazeError::InvalidDimensions { .. })
        ));
    }
}
