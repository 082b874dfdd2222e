//! Maze assets: the collidable wall registry plus an optional exit marker.
//!
//! A maze file is JSON:
//!
//! ```json
//! { "version": "0.1", "maze_id": "maze_easy",
//!   "walls": [ { "min": [-1, 0, -10], "max": [-0.8, 3, 2] } ],
//!   "exit":  { "position": [0, 0.9, -9] } }
//! ```
//!
//! Only boxes listed under `walls` are collidable, and only `exit` can end the
//! level. A maze without an exit loads fine; it just can never be completed.

use crate::collision::WallBox;
use crate::error::{MazeError, Result};
use glam::Vec3;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct MazeFile {
    pub version: String,
    pub maze_id: String,
    #[serde(default)]
    pub walls: Vec<WallBox>,
    #[serde(default)]
    pub exit: Option<ExitMarker>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ExitMarker {
    pub position: Vec3,
}

/// Loaded, validated level geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeGeometry {
    pub maze_id: String,
    pub walls: Vec<WallBox>,
    pub exit: Option<Vec3>,
}

impl MazeGeometry {
    pub fn from_file(file: MazeFile) -> Self {
        Self {
            maze_id: file.maze_id,
            walls: file.walls,
            exit: file.exit.map(|marker| marker.position),
        }
    }

    /// Distance from `point` to the exit marker, if the maze has one.
    pub fn distance_to_exit(&self, point: Vec3) -> Option<f32> {
        self.exit.map(|exit| exit.distance(point))
    }
}

pub fn load_maze_from_path(path: &Path) -> Result<MazeGeometry> {
    let raw = fs::read_to_string(path).map_err(|e| MazeError::io(path, e))?;
    parse_maze(&raw, path)
}

pub fn parse_maze(raw: &str, source: &Path) -> Result<MazeGeometry> {
    let file: MazeFile = serde_json::from_str(raw).map_err(|e| MazeError::json(source, e))?;
    validate_maze_file(&file)?;
    Ok(MazeGeometry::from_file(file))
}

fn validate_maze_file(file: &MazeFile) -> Result<()> {
    if file.maze_id.trim().is_empty() {
        return Err(MazeError::Validation("maze_id must not be empty".to_string()));
    }
    if file.walls.is_empty() {
        log::warn!(
            "Maze '{}' has no walls. This is allowed but often accidental.",
            file.maze_id
        );
    }
    for (i, wall) in file.walls.iter().enumerate() {
        if !wall.is_well_formed() {
            return Err(MazeError::Validation(format!(
                "maze '{}' wall #{i} is malformed (min {:?}, max {:?})",
                file.maze_id, wall.min, wall.max
            )));
        }
    }
    if let Some(exit) = &file.exit {
        if !exit.position.is_finite() {
            return Err(MazeError::Validation(format!(
                "maze '{}' exit position is not finite",
                file.maze_id
            )));
        }
    }
    Ok(())
}
