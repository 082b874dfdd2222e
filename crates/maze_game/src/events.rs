//! Everything that reaches the simulation from outside arrives here.
//!
//! Hosts post key events, pointer motion and menu commands, loaders post their results, and the
//! session drains the queue once at the start of every frame. Posting never
//! touches simulation state directly, so the per-frame order is fixed no matter
//! when or from which thread an event was sent.

use crate::level::MazeGeometry;
use maze_core::input::KeyEvent;
use std::sync::mpsc;

/// Identifies one load request. Results for any other ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(pub u64);

/// The original menu buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Start,
    Resume,
    Restart,
}

#[derive(Debug, Clone)]
pub enum GameEvent {
    Key(KeyEvent),
    /// Relative pointer motion in pixels since the last event.
    Look {
        dx: f32,
        dy: f32,
    },
    Command(MenuCommand),
    LevelLoaded {
        ticket: LoadTicket,
        geometry: MazeGeometry,
    },
    LevelLoadFailed {
        ticket: LoadTicket,
        message: String,
    },
}

pub type EventSender = mpsc::Sender<GameEvent>;
pub type EventReceiver = mpsc::Receiver<GameEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::channel()
}
