//! Maze Runner simulation core.
//!
//! [`session::MazeSession`] is the entry point: hosts build one from a
//! [`config::GameConfig`] and three collaborators (asset loader, leaderboard,
//! presenter), post input through its event queue, and call `frame(now)` once
//! per display refresh.

pub mod collision;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod level;
pub mod loader;
pub mod presentation;
pub mod progression;
pub mod session;
pub mod state;

pub use config::GameConfig;
pub use error::{MazeError, Result};
pub use events::{GameEvent, MenuCommand};
pub use session::MazeSession;
pub use state::GameState;
