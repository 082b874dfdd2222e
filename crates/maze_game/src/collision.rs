//! Wall collision: discrete raycast probing against static maze walls.
//!
//! Walls are axis-aligned boxes. Each simulation step the detector stands at the
//! player's *candidate* next position (current position plus one step of
//! horizontal velocity) and casts four horizontal rays, in order `+X, -X, +Z, -Z`.
//! The first direction with a wall closer than the probe distance decides the
//! outcome: the velocity component on that direction's axis is zeroed and the
//! whole horizontal move for the step is suppressed. Remaining directions are not
//! examined.
//!
//! Rays start at eye height, so a player who has jumped above a wall's top no
//! longer collides with it. A ray whose origin is already inside a wall hits it
//! at distance zero.

use glam::Vec3;
use serde::Deserialize;

/// Probe order. The first qualifying hit wins.
pub const PROBE_DIRECTIONS: [Vec3; 4] = [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z];

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct WallBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl WallBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    /// Distance along `dir` from `origin` to the first point of this box, using
    /// the slab method. `None` if the ray misses or the box is behind the origin.
    pub fn ray_distance(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let mut t_near = 0.0_f32;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() <= f32::EPSILON {
                // Parallel to this slab: must already be between its planes.
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        Some(t_near)
    }
}

/// Velocity axes the detector wants zeroed this step. Transient, never stored
/// beyond the frame that produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionProbeResult {
    pub zero_x: bool,
    pub zero_z: bool,
}

impl CollisionProbeResult {
    pub const CLEAR: Self = Self {
        zero_x: false,
        zero_z: false,
    };

    /// A blocked probe suppresses the entire horizontal move for the step.
    pub fn is_blocked(&self) -> bool {
        self.zero_x || self.zero_z
    }

    fn for_direction(dir: Vec3) -> Self {
        Self {
            zero_x: dir.x != 0.0,
            zero_z: dir.z != 0.0,
        }
    }
}

/// Runs the four-direction probe. `walls` empty (no level loaded) never blocks.
pub fn probe_walls(
    walls: &[WallBox],
    position: Vec3,
    velocity: Vec3,
    dt: f32,
    collision_distance: f32,
) -> CollisionProbeResult {
    if walls.is_empty() {
        return CollisionProbeResult::CLEAR;
    }

    let candidate = Vec3::new(
        position.x + velocity.x * dt,
        position.y,
        position.z + velocity.z * dt,
    );

    for dir in PROBE_DIRECTIONS {
        let hit = walls
            .iter()
            .filter_map(|wall| wall.ray_distance(candidate, dir))
            .any(|distance| distance < collision_distance);
        if hit {
            log::trace!(
                "Wall probe hit along ({}, {}) at ({:.2}, {:.2})",
                dir.x,
                dir.z,
                candidate.x,
                candidate.z
            );
            return CollisionProbeResult::for_direction(dir);
        }
    }

    CollisionProbeResult::CLEAR
}
