//! Property tests for the simulation core.
//!
//! These use `proptest` to drive the controller, the wall probe, the score
//! table and level progression with generated inputs and check the invariants
//! that must hold for all of them.

use glam::Vec3;
use maze_game::collision::{probe_walls, WallBox};
use maze_game::controller::{CharacterController, ControllerConfig, ControllerInput};
use maze_game::leaderboard::{Leaderboard, MemoryStore, PersistentLeaderboard};
use maze_game::progression::{LevelDef, LevelProgression};
use maze_game::state::{GameState, GameStateMachine, Trigger};
use proptest::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn controller_with(velocity: Vec3, height: f32) -> CharacterController {
    let mut controller = CharacterController::new(ControllerConfig::default());
    controller.kinematics.velocity = velocity;
    controller.kinematics.position.y = height;
    controller.kinematics.grounded = height <= controller.config.eye_height;
    controller
}

/// A slab whose near face sits `gap` from the origin along `dir`, wide enough
/// that small sideways drift still faces it.
fn slab_facing(dir: Vec3, gap: f32) -> WallBox {
    let near = dir * gap;
    let far = dir * (gap + 0.2);
    let side = Vec3::new(dir.z.abs(), 0.0, dir.x.abs()) * 50.0;
    let lo = near.min(far) - side;
    let hi = near.max(far) + side;
    WallBox::new(Vec3::new(lo.x, 0.0, lo.z), Vec3::new(hi.x, 3.0, hi.z))
}

fn cardinal() -> impl Strategy<Value = Vec3> {
    prop_oneof![
        Just(Vec3::X),
        Just(Vec3::NEG_X),
        Just(Vec3::Z),
        Just(Vec3::NEG_Z)
    ]
}

#[derive(Debug, Clone)]
enum LevelOp {
    Advance,
    Restart,
}

fn level_op() -> impl Strategy<Value = LevelOp> {
    prop_oneof![4 => Just(LevelOp::Advance), 1 => Just(LevelOp::Restart)]
}

fn trigger() -> impl Strategy<Value = Trigger> {
    prop_oneof![
        Just(Trigger::LevelReady),
        Just(Trigger::PauseToggled),
        Just(Trigger::ResumeRequested),
        Just(Trigger::AllLevelsCompleted),
        Just(Trigger::RestartRequested),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn damping_never_flips_horizontal_velocity(
        vx in -200.0f32..200.0,
        vz in -200.0f32..200.0,
        dt in 0.0f32..1.0,
    ) {
        let mut controller = controller_with(Vec3::new(vx, 0.0, vz), 1.8);
        controller.step(ControllerInput::default(), dt, &[]);
        let v = controller.kinematics.velocity;
        prop_assert!(v.x * vx >= 0.0, "x flipped: {} -> {}", vx, v.x);
        prop_assert!(v.z * vz >= 0.0, "z flipped: {} -> {}", vz, v.z);
        prop_assert!(v.x.abs() <= vx.abs());
        prop_assert!(v.z.abs() <= vz.abs());
    }

    #[test]
    fn idle_player_settles_at_eye_height(
        vx in -50.0f32..50.0,
        vy in -100.0f32..400.0,
        vz in -50.0f32..50.0,
        height in 1.8f32..20.0,
    ) {
        let mut controller = controller_with(Vec3::new(vx, vy, vz), height);
        for _ in 0..600 {
            controller.step(ControllerInput::default(), DT, &[]);
            prop_assert!(controller.kinematics.position.y >= controller.config.eye_height);
        }
        let k = controller.kinematics;
        prop_assert!(k.grounded);
        prop_assert_eq!(k.position.y, controller.config.eye_height);
        prop_assert_eq!(k.velocity.y, 0.0);
        prop_assert!(k.horizontal_speed() < 1e-3);
    }

    #[test]
    fn near_wall_zeroes_its_axis_and_holds_position(
        dir in cardinal(),
        gap in 0.05f32..0.45,
        sideways in -10.0f32..10.0,
    ) {
        let side = Vec3::new(dir.z.abs(), 0.0, dir.x.abs());
        let wall = slab_facing(dir, gap);
        let mut controller = controller_with(side * sideways, 1.8);
        let before = controller.kinematics.position;

        controller.step(ControllerInput::default(), DT, &[wall]);

        let contacts = controller.contacts;
        prop_assert_eq!(contacts.zero_x, dir.x != 0.0);
        prop_assert_eq!(contacts.zero_z, dir.z != 0.0);
        let after = controller.kinematics.position;
        prop_assert_eq!(after.x, before.x);
        prop_assert_eq!(after.z, before.z);
        if dir.x != 0.0 {
            prop_assert_eq!(controller.kinematics.velocity.x, 0.0);
        } else {
            prop_assert_eq!(controller.kinematics.velocity.z, 0.0);
        }
    }

    #[test]
    fn distant_wall_has_no_effect(dir in cardinal(), gap in 0.55f32..20.0) {
        let wall = slab_facing(dir, gap);
        let probe = probe_walls(&[wall], Vec3::new(0.0, 1.8, 0.0), Vec3::ZERO, DT, 0.5);
        prop_assert!(!probe.is_blocked());
    }

    #[test]
    fn leaderboard_keeps_five_best_ascending(
        times in prop::collection::vec(0.0f64..1000.0, 0..40),
    ) {
        let mut board = PersistentLeaderboard::open(MemoryStore, 5);
        for t in &times {
            board.add_score("Easy", *t);
            let scores = board.scores("Easy");
            prop_assert!(scores.len() <= 5);
            prop_assert!(scores.windows(2).all(|w| w[0] <= w[1]));
        }
        let mut best = times.clone();
        best.sort_by(f64::total_cmp);
        best.truncate(5);
        prop_assert_eq!(board.scores("Easy"), best);
    }

    #[test]
    fn level_index_only_grows_until_restart(
        ops in prop::collection::vec(level_op(), 1..40),
        count in 1usize..5,
    ) {
        let levels = (0..count)
            .map(|i| LevelDef::new(format!("L{i}"), format!("l{i}.json")))
            .collect();
        let mut progression = LevelProgression::new(levels, 1.5);
        for op in ops {
            let before = progression.current_index();
            match op {
                LevelOp::Advance => {
                    progression.advance();
                    prop_assert!(progression.current_index() >= before);
                    prop_assert!(progression.current_index() <= count);
                }
                LevelOp::Restart => {
                    progression.restart();
                    prop_assert_eq!(progression.current_index(), 0);
                }
            }
        }
    }

    #[test]
    fn pause_from_playing_always_pauses(triggers in prop::collection::vec(trigger(), 0..30)) {
        let mut machine = GameStateMachine::new();
        for t in triggers {
            let before = machine.state();
            let transition = machine.handle(t);
            if before == GameState::Playing && t == Trigger::PauseToggled {
                prop_assert_eq!(machine.state(), GameState::Paused);
            }
            if transition.is_none() {
                prop_assert_eq!(machine.state(), before);
            }
            prop_assert_eq!(machine.simulation_enabled(), machine.state() == GameState::Playing);
        }
    }
}
