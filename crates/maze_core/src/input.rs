//! Key events to player intent.
//!
//! - **Level-triggered (held):** the four movement flags stay set for as long as
//!   their key is down. A key-up clears the flag it drives, even if another key
//!   bound to the same direction is still down.
//!
//! - **Edge-triggered (jump / camera / pause / confirm):** set only on the
//!   released-to-pressed transition of a key, so OS auto-repeat never re-fires
//!   them. Each edge is consumed by the first `take_*` call and anything left
//!   over is dropped by `end_frame()`, which the frame loop calls once per frame
//!   whether or not the simulation ran.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Space,
    V,
    Escape,
    Enter,
}

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Jump,
    ToggleCamera,
    Pause,
    Confirm,
}

impl Action {
    pub fn for_key(key: Key) -> Self {
        match key {
            Key::Up | Key::W => Action::Forward,
            Key::Down | Key::S => Action::Back,
            Key::Left | Key::A => Action::StrafeLeft,
            Key::Right | Key::D => Action::StrafeRight,
            Key::Space => Action::Jump,
            Key::V => Action::ToggleCamera,
            Key::Escape => Action::Pause,
            Key::Enter => Action::Confirm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn down(key: Key) -> Self {
        Self { key, pressed: true }
    }

    pub fn up(key: Key) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    jump_requested: bool,
    camera_toggle: bool,
    pause_requested: bool,
    confirm_requested: bool,
}

impl IntentState {
    pub fn has_horizontal_intent(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }

    pub fn jump_pending(&self) -> bool {
        self.jump_requested
    }

    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    pub fn take_camera_toggle(&mut self) -> bool {
        std::mem::take(&mut self.camera_toggle)
    }

    pub fn take_pause(&mut self) -> bool {
        std::mem::take(&mut self.pause_requested)
    }

    pub fn take_confirm(&mut self) -> bool {
        std::mem::take(&mut self.confirm_requested)
    }

    fn clear_edges(&mut self) {
        self.jump_requested = false;
        self.camera_toggle = false;
        self.pause_requested = false;
        self.confirm_requested = false;
    }
}

pub struct InputMapper {
    intent: IntentState,
    held: HashSet<Key>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self {
            intent: IntentState::default(),
            held: HashSet::new(),
        }
    }

    pub fn handle(&mut self, event: KeyEvent) {
        if event.pressed {
            self.key_down(event.key);
        } else {
            self.key_up(event.key);
        }
    }

    pub fn key_down(&mut self, key: Key) {
        let fresh = self.held.insert(key);
        match Action::for_key(key) {
            Action::Forward => self.intent.forward = true,
            Action::Back => self.intent.back = true,
            Action::StrafeLeft => self.intent.left = true,
            Action::StrafeRight => self.intent.right = true,
            Action::Jump if fresh => self.intent.jump_requested = true,
            Action::ToggleCamera if fresh => self.intent.camera_toggle = true,
            Action::Pause if fresh => self.intent.pause_requested = true,
            Action::Confirm if fresh => self.intent.confirm_requested = true,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
        match Action::for_key(key) {
            Action::Forward => self.intent.forward = false,
            Action::Back => self.intent.back = false,
            Action::StrafeLeft => self.intent.left = false,
            Action::StrafeRight => self.intent.right = false,
            _ => {}
        }
    }

    pub fn intent(&self) -> &IntentState {
        &self.intent
    }

    pub fn intent_mut(&mut self) -> &mut IntentState {
        &mut self.intent
    }

    /// Releases every key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.intent = IntentState::default();
    }

    pub fn end_frame(&mut self) {
        self.intent.clear_edges();
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new()
    }
}
