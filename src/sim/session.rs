/// A game session: one maze, one player, one clock.
///
/// Sessions are replaced wholesale — restart and next-level both build a
/// fresh `Session`, so no maze or player state ever leaks across levels.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::MazeConfig;
use crate::domain::cell::Direction;
use crate::domain::difficulty;
use crate::domain::maze::{Maze, Perturbation};
use crate::domain::movement::{self, MoveOutcome, PlayerState};
use crate::sim::event::SessionEvent;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    Won,
}

pub struct Session {
    pub level: u8,
    pub maze: Maze,
    pub player: PlayerState,
    pub phase: Phase,
    pub moves: u32,
    started: Instant,
    final_time: Option<Duration>,
}

impl Session {
    /// Build a session for a difficulty level. Out-of-range levels clamp.
    pub fn new(level: u8, cfg: &MazeConfig) -> Session {
        let level = difficulty::clamp_level(level);
        let (cols, rows) = difficulty::dims_for_level(level);

        let mut rng = match cfg.seed {
            // Mix the level in so a fixed seed still varies per level
            // while staying reproducible run to run.
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(u64::from(level))),
            None => StdRng::from_entropy(),
        };

        // dims_for_level never yields cols/rows below 1.
        let mut maze = Maze::generate(cols, rows, &mut rng)
            .unwrap_or_else(|e| unreachable!("difficulty table produced {e}"));
        maze.perturb(
            &mut rng,
            Perturbation {
                close_fraction: cfg.close_fraction,
                open_fraction: cfg.open_fraction,
            },
        );

        let player = PlayerState::at_start(&maze);
        Session {
            level,
            maze,
            player,
            phase: Phase::Playing,
            moves: 0,
            started: Instant::now(),
            final_time: None,
        }
    }

    /// Validate and apply one directional input.
    pub fn try_move(&mut self, dir: Direction) -> Vec<SessionEvent> {
        if self.phase != Phase::Playing {
            return vec![];
        }
        match movement::attempt_move(&self.maze, self.player.x, self.player.y, dir) {
            MoveOutcome::Accepted { x, y } => {
                self.player = PlayerState { x, y };
                self.moves += 1;
                let mut events = vec![SessionEvent::MoveAccepted { x, y }];
                if movement::has_reached_exit(self.player.pos(), &self.maze) {
                    let elapsed = self.started.elapsed();
                    self.final_time = Some(elapsed);
                    self.phase = Phase::Won;
                    events.push(SessionEvent::ReachedExit { elapsed });
                }
                events
            }
            MoveOutcome::Blocked => vec![SessionEvent::MoveBlocked],
        }
    }

    /// Running clock while playing, frozen final time once won.
    pub fn elapsed(&self) -> Duration {
        self.final_time.unwrap_or_else(|| self.started.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movement::attempt_move;

    fn test_cfg(seed: u64) -> MazeConfig {
        MazeConfig { seed: Some(seed), close_fraction: 0.0, open_fraction: 0.0 }
    }

    /// Walk start→exit via BFS parents, driving the session itself.
    fn solve(session: &mut Session) {
        let maze = session.maze.clone();
        let cols = maze.grid().cols();
        let mut parent: Vec<Option<(usize, usize, Direction)>> =
            vec![None; maze.grid().len()];
        let mut seen = vec![false; maze.grid().len()];
        let mut queue = std::collections::VecDeque::new();
        let (sx, sy) = maze.start();
        seen[sy * cols + sx] = true;
        queue.push_back((sx, sy));
        while let Some((x, y)) = queue.pop_front() {
            for dir in Direction::ALL {
                if let MoveOutcome::Accepted { x: nx, y: ny } =
                    attempt_move(&maze, x, y, dir)
                {
                    if !seen[ny * cols + nx] {
                        seen[ny * cols + nx] = true;
                        parent[ny * cols + nx] = Some((x, y, dir));
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
        let mut path = vec![];
        let mut cur = maze.exit();
        while cur != maze.start() {
            let (px, py, dir) = parent[cur.1 * cols + cur.0].expect("exit reachable");
            path.push(dir);
            cur = (px, py);
        }
        path.reverse();
        for dir in path {
            session.try_move(dir);
        }
    }

    #[test]
    fn new_session_starts_at_start() {
        let s = Session::new(1, &test_cfg(1));
        assert_eq!(s.player.pos(), s.maze.start());
        assert_eq!(s.phase, Phase::Playing);
        assert_eq!(s.moves, 0);
    }

    #[test]
    fn blocked_moves_do_not_count() {
        let mut s = Session::new(1, &test_cfg(1));
        // Start is the NW corner; north and west are always border walls.
        let events = s.try_move(Direction::North);
        assert!(matches!(events[..], [SessionEvent::MoveBlocked]));
        assert_eq!(s.moves, 0);
        assert_eq!(s.player.pos(), s.maze.start());
    }

    #[test]
    fn solving_the_maze_wins() {
        let mut s = Session::new(3, &test_cfg(77));
        solve(&mut s);
        assert_eq!(s.phase, Phase::Won);
        assert_eq!(s.player.pos(), s.maze.exit());
    }

    #[test]
    fn final_time_freezes_on_win() {
        let mut s = Session::new(1, &test_cfg(5));
        solve(&mut s);
        let t1 = s.elapsed();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(s.elapsed(), t1);
    }

    #[test]
    fn input_after_win_is_ignored() {
        let mut s = Session::new(1, &test_cfg(5));
        solve(&mut s);
        let moves = s.moves;
        for dir in Direction::ALL {
            assert!(s.try_move(dir).is_empty());
        }
        assert_eq!(s.moves, moves);
    }

    #[test]
    fn fixed_seed_reproduces_the_level() {
        let a = Session::new(4, &test_cfg(9));
        let b = Session::new(4, &test_cfg(9));
        for (ca, cb) in a.maze.grid().iter().zip(b.maze.grid().iter()) {
            assert_eq!(ca.walls, cb.walls);
        }
    }

    #[test]
    fn perturbed_session_is_still_winnable() {
        let cfg = MazeConfig { seed: Some(2), close_fraction: 0.3, open_fraction: 0.1 };
        let mut s = Session::new(6, &cfg);
        assert!(s.maze.exit_reachable());
        solve(&mut s);
        assert_eq!(s.phase, Phase::Won);
    }
}
