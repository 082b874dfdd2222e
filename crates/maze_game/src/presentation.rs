//! What the simulation hands to whoever draws it. Write-only: nothing here is
//! ever read back into the simulation.

use crate::leaderboard::LeaderboardListing;
use crate::state::GameState;
use glam::Vec3;
use maze_core::camera::{CameraMode, CameraPose};

pub const COMPLETION_MESSAGE: &str = "Congratulations! You've completed all levels!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    MainMenu { resume_available: bool },
    Completion,
}

impl Overlay {
    pub fn for_state(state: GameState) -> Self {
        match state {
            GameState::MainMenu => Overlay::MainMenu {
                resume_available: false,
            },
            GameState::Paused => Overlay::MainMenu {
                resume_available: true,
            },
            GameState::Completed => Overlay::Completion,
            GameState::Playing => Overlay::None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudText {
    pub timer: String,
    pub level: String,
}

pub fn timer_text(seconds: f64) -> String {
    format!("Time: {seconds:.2}")
}

/// `index` is zero-based; players see levels numbered from 1.
pub fn level_text(index: usize, name: &str) -> String {
    format!("Level: {} - {}", index + 1, name)
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub state: GameState,
    pub camera_mode: CameraMode,
    pub camera: CameraPose,
    pub player_eye: Vec3,
    pub hud: HudText,
    pub overlay: Overlay,
    pub loading: bool,
    /// The level under play failed to load; Start asks for it again.
    pub retry_available: bool,
}

pub trait Presenter {
    fn present(&mut self, frame: &FrameView);
    fn show_leaderboard(&mut self, listing: &LeaderboardListing);
}

/// Discards everything. For headless runs.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _frame: &FrameView) {}
    fn show_leaderboard(&mut self, _listing: &LeaderboardListing) {}
}
