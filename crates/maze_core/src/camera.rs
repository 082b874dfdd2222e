use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;
use serde::Deserialize;

/// Which camera the presenter draws from.
/// Presentation only: the mode NEVER changes movement or collision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    #[default]
    FirstPerson,
    ThirdPerson,
}

/// Mouse-driven view angles. Yaw 0 faces -Z and grows turning left; pitch is
/// clamped so the view never flips over the vertical.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    /// Apply a pointer delta in pixels. Moving right turns right, moving down looks down.
    pub fn turn(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw = (self.yaw - dx * sensitivity + PI).rem_euclid(TAU) - PI;
        self.pitch = (self.pitch - dy * sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Horizontal unit heading.
    pub fn forward(&self) -> Vec3 {
        let (sin, cos) = self.yaw.sin_cos();
        Vec3::new(-sin, 0.0, -cos)
    }

    /// Unit view direction including pitch.
    pub fn view_direction(&self) -> Vec3 {
        let (sin_p, cos_p) = self.pitch.sin_cos();
        self.forward() * cos_p + Vec3::Y * sin_p
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraMode {
    pub const ALL: &'static [CameraMode] = &[CameraMode::FirstPerson, CameraMode::ThirdPerson];

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstPerson => "1st person",
            Self::ThirdPerson => "3rd person",
        }
    }

    /// Toggle between the two views.
    pub fn next(self) -> Self {
        match self {
            Self::FirstPerson => Self::ThirdPerson,
            Self::ThirdPerson => Self::FirstPerson,
        }
    }

    /// Camera placement for a player whose eye is at `eye` and body centre at `body`.
    /// The third-person offset is fixed in world space.
    pub fn pose(
        self,
        eye: Vec3,
        body: Vec3,
        third_person_offset: Vec3,
        look: LookAngles,
    ) -> CameraPose {
        match self {
            Self::FirstPerson => CameraPose {
                eye,
                target: eye + look.view_direction(),
            },
            Self::ThirdPerson => CameraPose {
                eye: body + third_person_offset,
                target: body,
            },
        }
    }
}

impl std::fmt::Display for CameraMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
