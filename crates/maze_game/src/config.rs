use crate::controller::ControllerConfig;
use crate::error::{MazeError, Result};
use crate::leaderboard::DEFAULT_MAX_ENTRIES;
use crate::progression::LevelDef;
use glam::Vec3;
use maze_core::camera::CameraMode;
use maze_platform::window::PlatformConfig;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "assets/game.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub assets_dir: PathBuf,
    pub leaderboard_path: PathBuf,
    pub levels: Vec<LevelDef>,
    pub physics: ControllerConfig,
    pub exit_radius: f32,
    pub max_frame_dt: f64,
    pub max_scores_per_level: usize,
    pub third_person_offset: Vec3,
    /// Radians of turn per pixel of mouse motion.
    pub look_sensitivity: f32,
    pub initial_camera: CameraMode,
    pub window: PlatformConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets/mazes"),
            leaderboard_path: PathBuf::from("maze_leaderboard.json"),
            levels: vec![
                LevelDef::new("Easy", "maze_easy.json"),
                LevelDef::new("Medium", "maze_medium.json"),
                LevelDef::new("Hard", "maze_hard.json"),
            ],
            physics: ControllerConfig::default(),
            exit_radius: 1.5,
            max_frame_dt: 0.1,
            max_scores_per_level: DEFAULT_MAX_ENTRIES,
            third_person_offset: Vec3::new(0.0, 2.0, 5.0),
            look_sensitivity: 0.002,
            initial_camera: CameraMode::FirstPerson,
            window: PlatformConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| MazeError::io(path, e))?;
        let config: GameConfig =
            serde_json::from_str(&raw).map_err(|e| MazeError::json(path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Like `load_from_path`, but a missing file means "use the defaults".
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load_from_path(path) {
            Err(err) if err.is_not_found() => {
                log::warn!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(MazeError::Validation("at least one level is required".to_string()));
        }
        let mut names = HashSet::new();
        for level in &self.levels {
            if !names.insert(level.name.as_str()) {
                return Err(MazeError::Validation(format!(
                    "duplicate level name '{}'",
                    level.name
                )));
            }
        }

        let p = &self.physics;
        let positive = [
            ("physics.damping", p.damping),
            ("physics.gravity", p.gravity),
            ("physics.move_force", p.move_force),
            ("physics.jump_impulse", p.jump_impulse),
            ("physics.eye_height", p.eye_height),
            ("physics.collision_distance", p.collision_distance),
            ("exit_radius", self.exit_radius),
            ("look_sensitivity", self.look_sensitivity),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(MazeError::Validation(format!("{name} must be > 0, got {value}")));
            }
        }
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(MazeError::Validation("max_frame_dt must be > 0".to_string()));
        }
        if self.max_frame_dt as f32 > p.max_stable_dt() {
            log::warn!(
                "max_frame_dt {:.3}s exceeds the damping-stable step {:.3}s; damping will clamp",
                self.max_frame_dt,
                p.max_stable_dt()
            );
        }
        if self.max_scores_per_level == 0 {
            return Err(MazeError::Validation(
                "max_scores_per_level must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
