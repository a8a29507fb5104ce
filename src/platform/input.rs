//! Input polling
//!
//! The core only queries input; nothing is pushed into it.

use std::collections::HashSet;

use glam::Vec2;

/// Keyboard keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Turn left
    S,
    /// Turn right
    F,
    /// Thrust
    E,
    /// Fire
    J,
    /// Special attack A (narrow fan)
    K,
    /// Special attack B (full ring)
    L,
    /// Respawn / start
    N,
    /// Toggle multiplayer
    M,
    /// Pause
    P,
    /// Single-step
    O,
    /// Slow motion (held)
    T,
    /// Mute music
    Q,
    /// Spawn one asteroid (debug)
    I,
    Space,
    Escape,
    F1,
    F8,
}

/// Gamepad buttons the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    Start,
    Back,
    /// Left bumper (pause)
    LeftShoulder,
    /// Left stick click (slow motion)
    LeftThumb,
}

/// Input state for the current frame
pub trait InputState {
    fn is_key_down(&self, key: Key) -> bool;
    fn was_key_just_pressed(&self, key: Key) -> bool;
    fn is_button_down(&self, button: Button) -> bool;
    fn was_button_just_pressed(&self, button: Button) -> bool;
    /// Left stick after dead-zone correction (magnitude 0..=1)
    fn left_stick(&self) -> Vec2;
}

/// Plain-data input state, filled by the host (or a test) each frame
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub keys_down: HashSet<Key>,
    pub keys_pressed: HashSet<Key>,
    pub buttons_down: HashSet<Button>,
    pub buttons_pressed: HashSet<Button>,
    pub stick: Vec2,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as held
    pub fn hold(mut self, key: Key) -> Self {
        self.keys_down.insert(key);
        self
    }

    /// Mark a key as pressed this frame (and held)
    pub fn press(mut self, key: Key) -> Self {
        self.keys_down.insert(key);
        self.keys_pressed.insert(key);
        self
    }

    /// Mark a gamepad button as pressed this frame (and held)
    pub fn press_button(mut self, button: Button) -> Self {
        self.buttons_down.insert(button);
        self.buttons_pressed.insert(button);
        self
    }

    pub fn with_stick(mut self, stick: Vec2) -> Self {
        self.stick = stick.clamp_length_max(1.0);
        self
    }

    /// Drop the one-frame "just pressed" edges, keeping held state
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.buttons_pressed.clear();
    }
}

impl InputState for InputSnapshot {
    fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    fn was_key_just_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    fn is_button_down(&self, button: Button) -> bool {
        self.buttons_down.contains(&button)
    }

    fn was_button_just_pressed(&self, button: Button) -> bool {
        self.buttons_pressed.contains(&button)
    }

    fn left_stick(&self) -> Vec2 {
        self.stick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_edges() {
        let mut input = InputSnapshot::new().press(Key::J).hold(Key::E);
        assert!(input.was_key_just_pressed(Key::J));
        assert!(input.is_key_down(Key::E));
        assert!(!input.was_key_just_pressed(Key::E));

        input.end_frame();
        assert!(!input.was_key_just_pressed(Key::J));
        assert!(input.is_key_down(Key::J));
    }

    #[test]
    fn test_stick_is_clamped() {
        let input = InputSnapshot::new().with_stick(Vec2::new(3.0, 4.0));
        assert!((input.left_stick().length() - 1.0).abs() < 1e-5);
    }
}
