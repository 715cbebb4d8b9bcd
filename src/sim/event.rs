/// Events emitted while processing a move.
/// The presentation layer consumes these for HUD feedback.

use std::time::Duration;

#[derive(Clone, Debug)]
#[allow(dead_code)]
pub enum SessionEvent {
    MoveAccepted { x: usize, y: usize },
    MoveBlocked,
    ReachedExit { elapsed: Duration },
}
