use crate::level::MazeGeometry;
use glam::Vec3;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LevelDef {
    pub name: String,
    pub asset: String,
}

impl LevelDef {
    pub fn new(name: impl Into<String>, asset: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asset: asset.into(),
        }
    }
}

/// What happened when the current level was finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// There is another level; load this one next.
    Next { index: usize, level: LevelDef },
    /// That was the last level.
    Finished,
}

/// Walks the fixed level list. The index only ever grows, except on `restart`.
#[derive(Debug, Clone)]
pub struct LevelProgression {
    levels: Vec<LevelDef>,
    current_index: usize,
    exit_radius: f32,
}

impl LevelProgression {
    pub fn new(levels: Vec<LevelDef>, exit_radius: f32) -> Self {
        Self {
            levels,
            current_index: 0,
            exit_radius,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// `None` once every level has been finished.
    pub fn current_level(&self) -> Option<&LevelDef> {
        self.levels.get(self.current_index)
    }

    pub fn levels(&self) -> &[LevelDef] {
        &self.levels
    }

    pub fn level_names(&self) -> Vec<&str> {
        self.levels.iter().map(|l| l.name.as_str()).collect()
    }

    /// Strictly inside the exit radius. A maze with no exit is never reached.
    pub fn exit_reached(&self, body_position: Vec3, geometry: &MazeGeometry) -> bool {
        geometry
            .distance_to_exit(body_position)
            .is_some_and(|d| d < self.exit_radius)
    }

    pub fn advance(&mut self) -> Advance {
        self.current_index = (self.current_index + 1).min(self.levels.len());
        match self.levels.get(self.current_index) {
            Some(level) => Advance::Next {
                index: self.current_index,
                level: level.clone(),
            },
            None => Advance::Finished,
        }
    }

    pub fn restart(&mut self) {
        self.current_index = 0;
    }
}
