//! Maze asset loading, off the frame thread.

use crate::events::{EventSender, GameEvent, LoadTicket};
use crate::level::load_maze_from_path;
use std::path::PathBuf;
use std::thread;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub level_index: usize,
    pub asset_ref: String,
}

/// Starts loading a maze. The result must come back as exactly one
/// `LevelLoaded` or `LevelLoadFailed` event carrying the request's ticket.
pub trait AssetLoader {
    fn request(&mut self, request: LoadRequest, reply: EventSender);
}

/// Reads maze JSON from `assets_dir` on a worker thread.
pub struct JsonMazeLoader {
    assets_dir: PathBuf,
}

impl JsonMazeLoader {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    pub fn resolve(&self, asset_ref: &str) -> PathBuf {
        self.assets_dir.join(asset_ref)
    }
}

impl AssetLoader for JsonMazeLoader {
    fn request(&mut self, request: LoadRequest, reply: EventSender) {
        let path = self.resolve(&request.asset_ref);
        log::info!(
            "Loading level {} from {}",
            request.level_index + 1,
            path.display()
        );

        let spawned = thread::Builder::new()
            .name(format!("maze-load-{}", request.ticket.0))
            .spawn(move || {
                let event = match load_maze_from_path(&path) {
                    Ok(geometry) => {
                        log::debug!(
                            "Maze '{}' parsed: {} walls, exit {}",
                            geometry.maze_id,
                            geometry.walls.len(),
                            if geometry.exit.is_some() { "present" } else { "missing" }
                        );
                        GameEvent::LevelLoaded {
                            ticket: request.ticket,
                            geometry,
                        }
                    }
                    Err(err) => GameEvent::LevelLoadFailed {
                        ticket: request.ticket,
                        message: err.to_string(),
                    },
                };
                // The session may already be gone at shutdown.
                let _ = reply.send(event);
            });

        if let Err(err) = spawned {
            log::error!("Could not start loader thread: {err}");
        }
    }
}
