use crate::collision::{probe_walls, CollisionProbeResult, WallBox};
use glam::{Vec2, Vec3};
use maze_core::input::IntentState;
use serde::Deserialize;

/// Movement request for one step. `move_x` is right minus left, `move_z` is
/// back minus forward, both relative to the player's heading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerInput {
    pub move_x: f32,
    pub move_z: f32,
    pub jump_pressed: bool,
    /// Heading in radians about +Y. Zero faces -Z; positive turns left.
    pub yaw: f32,
}

impl ControllerInput {
    /// Reads the held flags and consumes the jump edge.
    pub fn from_intent(intent: &mut IntentState) -> Self {
        let axis = |neg: bool, pos: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Self {
            move_x: axis(intent.left, intent.right),
            move_z: axis(intent.forward, intent.back),
            jump_pressed: intent.take_jump(),
            yaw: 0.0,
        }
    }

    pub fn facing(self, yaw: f32) -> Self {
        Self { yaw, ..self }
    }

    /// Unit world-space horizontal direction (x, z), or zero with no
    /// horizontal intent.
    pub fn direction(&self) -> Vec2 {
        let local = Vec2::new(self.move_x, self.move_z).normalize_or_zero();
        let (sin, cos) = self.yaw.sin_cos();
        Vec2::new(
            local.x * cos + local.y * sin,
            local.y * cos - local.x * sin,
        )
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Horizontal velocity decay rate, per second.
    pub damping: f32,
    pub gravity: f32,
    pub move_force: f32,
    pub jump_impulse: f32,
    pub eye_height: f32,
    pub collision_distance: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            gravity: 980.0,
            move_force: 400.0,
            jump_impulse: 350.0,
            eye_height: 1.8,
            collision_distance: 0.5,
        }
    }
}

impl ControllerConfig {
    /// Largest step for which damping alone can't reverse a velocity's sign.
    pub fn max_stable_dt(&self) -> f32 {
        1.0 / self.damping
    }

    pub fn spawn_point(&self) -> Vec3 {
        Vec3::new(0.0, self.eye_height, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerKinematics {
    /// Eye position.
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
}

impl PlayerKinematics {
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            grounded: true,
        }
    }

    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CharacterController {
    pub kinematics: PlayerKinematics,
    pub contacts: CollisionProbeResult,
    pub config: ControllerConfig,
}

impl CharacterController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            kinematics: PlayerKinematics::at_rest(config.spawn_point()),
            contacts: CollisionProbeResult::CLEAR,
            config,
        }
    }

    /// Back to the spawn point at rest, for a fresh level.
    pub fn reset(&mut self) {
        self.kinematics = PlayerKinematics::at_rest(self.config.spawn_point());
        self.contacts = CollisionProbeResult::CLEAR;
    }

    /// Centre of the player's body, half an eye-height below the eye.
    pub fn body_position(&self) -> Vec3 {
        self.kinematics.position - Vec3::Y * (self.config.eye_height * 0.5)
    }

    /// One semi-implicit Euler step against `walls`.
    pub fn step(&mut self, input: ControllerInput, dt: f32, walls: &[WallBox]) {
        let cfg = self.config;
        let k = &mut self.kinematics;

        // Clamped so a long step can at most stop the player, never reverse them.
        let decay = (cfg.damping * dt).clamp(0.0, 1.0);
        k.velocity.x -= k.velocity.x * decay;
        k.velocity.z -= k.velocity.z * decay;
        k.velocity.y -= cfg.gravity * dt;

        let dir = input.direction();
        k.velocity.x += dir.x * cfg.move_force * dt;
        k.velocity.z += dir.y * cfg.move_force * dt;

        // Jump is edge-triggered and only legal from grounded state.
        if input.jump_pressed && k.grounded {
            k.velocity.y += cfg.jump_impulse;
            k.grounded = false;
        }

        let probe = probe_walls(walls, k.position, k.velocity, dt, cfg.collision_distance);
        if probe.zero_x {
            k.velocity.x = 0.0;
        }
        if probe.zero_z {
            k.velocity.z = 0.0;
        }
        if !probe.is_blocked() {
            k.position.x += k.velocity.x * dt;
            k.position.z += k.velocity.z * dt;
        }
        self.contacts = probe;

        k.position.y += k.velocity.y * dt;
        if k.position.y < cfg.eye_height {
            k.velocity.y = 0.0;
            k.position.y = cfg.eye_height;
            k.grounded = true;
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.kinematics.grounded
    }

    pub fn is_blocked(&self) -> bool {
        self.contacts.is_blocked()
    }
}
