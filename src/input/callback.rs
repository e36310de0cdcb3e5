// Callback signatures for change notifications
//
// Callbacks are owned by the poller or action they are registered on and are
// invoked synchronously from inside `poll_events`.

use super::control::{GamepadAxis, GamepadButton, GamepadId, KeyboardKey, MouseButton};
use glam::Vec2;

/// (key, is_down)
pub type KeyboardCallback = Box<dyn FnMut(KeyboardKey, bool)>;

/// (button, is_down)
pub type MouseButtonCallback = Box<dyn FnMut(MouseButton, bool)>;

/// (gamepad, button, is_down)
pub type GamepadButtonCallback = Box<dyn FnMut(GamepadId, GamepadButton, bool)>;

/// (accumulated value, movement)
pub type MouseWheelCallback = Box<dyn FnMut(f32, f32)>;

/// (gamepad, axis, accumulated value, movement)
pub type GamepadAxisCallback = Box<dyn FnMut(GamepadId, GamepadAxis, f32, f32)>;

/// (position, delta)
pub type MousePositionCallback = Box<dyn FnMut(Vec2, Vec2)>;

/// (value, delta) for axis actions
pub type AxisCallback = Box<dyn FnMut(f32, f32)>;

/// (value, delta) for vector and multi-button actions
pub type VectorCallback = Box<dyn FnMut(Vec2, Vec2)>;
