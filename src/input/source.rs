// Device query interface and an in-memory device snapshot

use super::control::{GamepadAxis, GamepadButton, GamepadId, KeyboardKey, MouseButton, MAX_GAMEPADS};
use glam::Vec2;
use std::collections::{HashMap, HashSet};

/// The device queries the poller and actions are driven by
///
/// Implemented by a windowing/device backend. Every query is answered from the
/// backend's view of the current frame; out-of-range ids report "not pressed"
/// and zero movement.
pub trait InputSource {
    fn is_key_down(&self, key: KeyboardKey) -> bool;

    fn is_mouse_button_down(&self, button: MouseButton) -> bool;

    fn is_gamepad_button_down(&self, gamepad: GamepadId, button: GamepadButton) -> bool;

    fn is_gamepad_available(&self, gamepad: GamepadId) -> bool;

    fn is_window_focused(&self) -> bool;

    /// Wheel movement this frame, the dominant of the two wheel axes
    fn mouse_wheel_move(&self) -> f32;

    /// Wheel movement this frame on both axes
    fn mouse_wheel_move_v(&self) -> Vec2;

    fn mouse_position(&self) -> Vec2;

    fn gamepad_axis_movement(&self, gamepad: GamepadId, axis: GamepadAxis) -> f32;
}

/// State of one connected gamepad
#[derive(Debug, Clone, Default)]
struct GamepadState {
    buttons: HashSet<GamepadButton>,
    axes: HashMap<GamepadAxis, f32>,
}

/// A plain snapshot of device state
///
/// Backends write into it as device events arrive; it answers every
/// `InputSource` query directly. A gamepad is available while it is connected.
#[derive(Debug, Clone)]
pub struct InputState {
    focused: bool,
    keys: HashSet<KeyboardKey>,
    mouse_buttons: HashSet<MouseButton>,
    mouse_position: Vec2,
    wheel_move: Vec2,
    gamepads: HashMap<GamepadId, GamepadState>,
}

impl InputState {
    /// Create a focused snapshot with nothing held
    pub fn new() -> Self {
        Self {
            focused: true,
            keys: HashSet::new(),
            mouse_buttons: HashSet::new(),
            mouse_position: Vec2::ZERO,
            wheel_move: Vec2::ZERO,
            gamepads: HashMap::new(),
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn set_key(&mut self, key: KeyboardKey, down: bool) {
        if down {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
    }

    pub fn press_key(&mut self, key: KeyboardKey) {
        self.set_key(key, true);
    }

    pub fn release_key(&mut self, key: KeyboardKey) {
        self.set_key(key, false);
    }

    pub fn set_mouse_button(&mut self, button: MouseButton, down: bool) {
        if down {
            self.mouse_buttons.insert(button);
        } else {
            self.mouse_buttons.remove(&button);
        }
    }

    pub fn press_mouse_button(&mut self, button: MouseButton) {
        self.set_mouse_button(button, true);
    }

    pub fn release_mouse_button(&mut self, button: MouseButton) {
        self.set_mouse_button(button, false);
    }

    pub fn set_mouse_position(&mut self, position: Vec2) {
        self.mouse_position = position;
    }

    /// Add wheel movement for the current frame
    pub fn add_wheel_move(&mut self, movement: Vec2) {
        self.wheel_move += movement;
    }

    /// Mark a gamepad as connected
    /// Ids at or above `MAX_GAMEPADS` are ignored
    pub fn connect_gamepad(&mut self, gamepad: GamepadId) {
        if gamepad < MAX_GAMEPADS {
            self.gamepads.entry(gamepad).or_default();
        }
    }

    /// Disconnect a gamepad, dropping its button and axis state
    pub fn disconnect_gamepad(&mut self, gamepad: GamepadId) {
        self.gamepads.remove(&gamepad);
    }

    /// Set a button on a connected gamepad
    /// Writes to a disconnected gamepad are dropped
    pub fn set_gamepad_button(&mut self, gamepad: GamepadId, button: GamepadButton, down: bool) {
        if let Some(pad) = self.gamepads.get_mut(&gamepad) {
            if down {
                pad.buttons.insert(button);
            } else {
                pad.buttons.remove(&button);
            }
        }
    }

    /// Set the movement an axis reports on a connected gamepad
    pub fn set_gamepad_axis(&mut self, gamepad: GamepadId, axis: GamepadAxis, movement: f32) {
        if let Some(pad) = self.gamepads.get_mut(&gamepad) {
            pad.axes.insert(axis, movement);
        }
    }

    /// Clear the per-frame values (wheel movement)
    /// Call once per frame after polling
    pub fn end_frame(&mut self) {
        self.wheel_move = Vec2::ZERO;
    }

    /// Release everything and drop all gamepads
    pub fn clear(&mut self) {
        self.keys.clear();
        self.mouse_buttons.clear();
        self.wheel_move = Vec2::ZERO;
        self.gamepads.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for InputState {
    fn is_key_down(&self, key: KeyboardKey) -> bool {
        self.keys.contains(&key)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    fn is_gamepad_button_down(&self, gamepad: GamepadId, button: GamepadButton) -> bool {
        self.gamepads
            .get(&gamepad)
            .is_some_and(|pad| pad.buttons.contains(&button))
    }

    fn is_gamepad_available(&self, gamepad: GamepadId) -> bool {
        self.gamepads.contains_key(&gamepad)
    }

    fn is_window_focused(&self) -> bool {
        self.focused
    }

    fn mouse_wheel_move(&self) -> f32 {
        if self.wheel_move.x.abs() > self.wheel_move.y.abs() {
            self.wheel_move.x
        } else {
            self.wheel_move.y
        }
    }

    fn mouse_wheel_move_v(&self) -> Vec2 {
        self.wheel_move
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    fn gamepad_axis_movement(&self, gamepad: GamepadId, axis: GamepadAxis) -> f32 {
        self.gamepads
            .get(&gamepad)
            .and_then(|pad| pad.axes.get(&axis).copied())
            .unwrap_or(0.0)
    }
}
