//! Input snapshot
//!
//! [`InputSource`] is the polling interface the session reads each frame.
//! [`InputState`] is the in-memory snapshot hosts fill from their window /
//! gamepad backend (and tests script directly).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    D,
    N,
    O,
    P,
    T,
    Up,
    Left,
    Right,
    Space,
    Escape,
    F1,
    F8,
}

/// Gamepad buttons the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    A,
    B,
    X,
    Y,
    Start,
    Back,
}

/// Analog stick after dead-zone correction
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StickState {
    /// 0 (centered) to 1 (fully deflected)
    pub magnitude: f32,
    /// Deflection direction, degrees (0 = east)
    pub angle_degrees: f32,
}

impl StickState {
    /// Deflection as a vector of length `magnitude`
    pub fn position(&self) -> glam::Vec2 {
        crate::polar_degrees(self.angle_degrees, self.magnitude)
    }
}

/// Snapshot of one gamepad
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GamepadState {
    pub connected: bool,
    pub left_stick: StickState,
    pub right_stick: StickState,
    /// 0-1
    pub left_trigger: f32,
    /// 0-1
    pub right_trigger: f32,
    pub pressed: HashSet<Button>,
    pub just_pressed: HashSet<Button>,
}

impl GamepadState {
    pub fn is_button_pressed(&self, button: Button) -> bool {
        self.connected && self.pressed.contains(&button)
    }

    pub fn is_button_just_pressed(&self, button: Button) -> bool {
        self.connected && self.just_pressed.contains(&button)
    }
}

/// Polling interface consumed by the session
pub trait InputSource {
    fn is_key_pressed(&self, key: Key) -> bool;
    fn was_key_just_pressed(&self, key: Key) -> bool;
    fn was_key_just_released(&self, key: Key) -> bool;
    fn gamepad(&self, controller: usize) -> &GamepadState;
    /// Forward motor strengths (0-1) to a gamepad
    fn set_vibration(&mut self, controller: usize, left: f32, right: f32);
}

/// Frame input snapshot with vibration output
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
    gamepad: GamepadState,
    disconnected: GamepadState,
    /// Last (left, right) vibration the session requested
    pub vibration: (f32, f32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear edge-triggered state; call once per frame after the session update
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.gamepad.just_pressed.clear();
    }

    pub fn press(&mut self, key: Key) {
        if self.pressed.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        if self.pressed.remove(&key) {
            self.just_released.insert(key);
        }
    }

    pub fn gamepad_mut(&mut self) -> &mut GamepadState {
        &mut self.gamepad
    }

    pub fn press_button(&mut self, button: Button) {
        self.gamepad.connected = true;
        if self.gamepad.pressed.insert(button) {
            self.gamepad.just_pressed.insert(button);
        }
    }
}

impl InputSource for InputState {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn was_key_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    fn was_key_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    fn gamepad(&self, controller: usize) -> &GamepadState {
        // Single-controller game; other ids read as disconnected
        if controller == 0 {
            &self.gamepad
        } else {
            &self.disconnected
        }
    }

    fn set_vibration(&mut self, controller: usize, left: f32, right: f32) {
        if controller == 0 {
            self.vibration = (left, right);
        }
    }
}
