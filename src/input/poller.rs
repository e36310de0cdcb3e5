// Per-category input poller - diffs device state once per frame

use super::callback::{
    GamepadAxisCallback, GamepadButtonCallback, KeyboardCallback, MouseButtonCallback,
    MousePositionCallback, MouseWheelCallback,
};
use super::config::PollerConfig;
use super::control::{GamepadAxis, GamepadButton, GamepadId, KeyboardKey, MouseButton};
use super::source::InputSource;
use glam::Vec2;
use log::{debug, trace};
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// Turns sampled device state into change callbacks, one slot per category
///
/// A category is only sampled while its callback is bound. Discrete controls
/// are recorded silently the first time they are seen, so startup does not
/// produce a burst of "released" events.
pub struct InputPoller {
    config: PollerConfig,

    keyboard_callback: Option<KeyboardCallback>,
    mouse_button_callback: Option<MouseButtonCallback>,
    gamepad_button_callback: Option<GamepadButtonCallback>,
    mouse_wheel_callback: Option<MouseWheelCallback>,
    gamepad_axis_callback: Option<GamepadAxisCallback>,
    mouse_position_callback: Option<MousePositionCallback>,

    keyboard_states: HashMap<KeyboardKey, bool>,
    mouse_button_states: HashMap<MouseButton, bool>,
    gamepad_button_states: HashMap<(GamepadId, GamepadButton), bool>,
    gamepad_axis_states: HashMap<(GamepadId, GamepadAxis), f32>,
    mouse_wheel_value: f32,

    /// None until the first position sample
    mouse_position: Option<Vec2>,

    /// Gamepads seen available at least once
    known_gamepads: BTreeSet<GamepadId>,
}

impl InputPoller {
    /// Create a poller with the default configuration
    pub fn new() -> Self {
        Self::with_config(PollerConfig::default())
    }

    pub fn with_config(config: PollerConfig) -> Self {
        Self {
            config,
            keyboard_callback: None,
            mouse_button_callback: None,
            gamepad_button_callback: None,
            mouse_wheel_callback: None,
            gamepad_axis_callback: None,
            mouse_position_callback: None,
            keyboard_states: HashMap::new(),
            mouse_button_states: HashMap::new(),
            gamepad_button_states: HashMap::new(),
            gamepad_axis_states: HashMap::new(),
            mouse_wheel_value: 0.0,
            mouse_position: None,
            known_gamepads: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    pub fn set_keyboard_callback<F>(&mut self, callback: F)
    where
        F: FnMut(KeyboardKey, bool) + 'static,
    {
        self.keyboard_callback = Some(Box::new(callback));
    }

    pub fn set_mouse_button_callback<F>(&mut self, callback: F)
    where
        F: FnMut(MouseButton, bool) + 'static,
    {
        self.mouse_button_callback = Some(Box::new(callback));
    }

    pub fn set_gamepad_button_callback<F>(&mut self, callback: F)
    where
        F: FnMut(GamepadId, GamepadButton, bool) + 'static,
    {
        self.gamepad_button_callback = Some(Box::new(callback));
    }

    pub fn set_mouse_wheel_callback<F>(&mut self, callback: F)
    where
        F: FnMut(f32, f32) + 'static,
    {
        self.mouse_wheel_callback = Some(Box::new(callback));
    }

    pub fn set_gamepad_axis_callback<F>(&mut self, callback: F)
    where
        F: FnMut(GamepadId, GamepadAxis, f32, f32) + 'static,
    {
        self.gamepad_axis_callback = Some(Box::new(callback));
    }

    pub fn set_mouse_position_callback<F>(&mut self, callback: F)
    where
        F: FnMut(Vec2, Vec2) + 'static,
    {
        self.mouse_position_callback = Some(Box::new(callback));
    }

    /// Unbind every callback; recorded state is kept
    pub fn clear_callbacks(&mut self) {
        self.keyboard_callback = None;
        self.mouse_button_callback = None;
        self.gamepad_button_callback = None;
        self.mouse_wheel_callback = None;
        self.gamepad_axis_callback = None;
        self.mouse_position_callback = None;
    }

    /// Last recorded state of a key, if it has been observed
    pub fn key_state(&self, key: KeyboardKey) -> Option<bool> {
        self.keyboard_states.get(&key).copied()
    }

    /// Last recorded state of a mouse button, if it has been observed
    pub fn mouse_button_state(&self, button: MouseButton) -> Option<bool> {
        self.mouse_button_states.get(&button).copied()
    }

    /// Last recorded state of a gamepad button, if it has been observed
    pub fn gamepad_button_state(&self, gamepad: GamepadId, button: GamepadButton) -> Option<bool> {
        self.gamepad_button_states.get(&(gamepad, button)).copied()
    }

    /// Accumulated movement of a gamepad axis
    pub fn gamepad_axis_value(&self, gamepad: GamepadId, axis: GamepadAxis) -> f32 {
        self.gamepad_axis_states
            .get(&(gamepad, axis))
            .copied()
            .unwrap_or(0.0)
    }

    /// Accumulated mouse wheel movement
    pub fn mouse_wheel_value(&self) -> f32 {
        self.mouse_wheel_value
    }

    /// Last recorded mouse position, if one has been sampled
    pub fn mouse_position(&self) -> Option<Vec2> {
        self.mouse_position
    }

    /// Gamepads seen available by either gamepad sweep
    pub fn known_gamepads(&self) -> impl Iterator<Item = GamepadId> + '_ {
        self.known_gamepads.iter().copied()
    }

    /// Number of recorded per-control entries across all tables
    pub fn tracked_entries(&self) -> usize {
        self.keyboard_states.len()
            + self.mouse_button_states.len()
            + self.gamepad_button_states.len()
            + self.gamepad_axis_states.len()
    }

    /// Forget all recorded state; the next poll observes everything afresh
    pub fn reset(&mut self) {
        self.keyboard_states.clear();
        self.mouse_button_states.clear();
        self.gamepad_button_states.clear();
        self.gamepad_axis_states.clear();
        self.mouse_wheel_value = 0.0;
        self.mouse_position = None;
        self.known_gamepads.clear();
    }

    /// Poll using the configured focus policy
    pub fn poll<S: InputSource + ?Sized>(&mut self, source: &S) {
        let while_unfocused = self.config.poll_while_unfocused();
        self.poll_events(source, while_unfocused);
    }

    /// Sample every bound category and fire callbacks for what changed
    ///
    /// Does nothing at all while the window is unfocused unless
    /// `while_unfocused` is set, so the next focused poll diffs against the
    /// state recorded before focus was lost.
    pub fn poll_events<S: InputSource + ?Sized>(&mut self, source: &S, while_unfocused: bool) {
        if !while_unfocused && !source.is_window_focused() {
            trace!("Window unfocused, skipping poll");
            return;
        }

        self.poll_keyboard(source);
        self.poll_mouse_buttons(source);
        self.poll_gamepad_buttons(source);
        self.poll_mouse_wheel(source);
        self.poll_gamepad_axes(source);
        self.poll_mouse_position(source);
    }

    fn poll_keyboard<S: InputSource + ?Sized>(&mut self, source: &S) {
        let Some(callback) = self.keyboard_callback.as_mut() else {
            return;
        };
        for &key in KeyboardKey::ALL {
            let is_down = source.is_key_down(key);
            if record_transition(&mut self.keyboard_states, key, is_down) {
                trace!("Key {:?} {}", key, if is_down { "down" } else { "up" });
                callback(key, is_down);
            }
        }
    }

    fn poll_mouse_buttons<S: InputSource + ?Sized>(&mut self, source: &S) {
        let Some(callback) = self.mouse_button_callback.as_mut() else {
            return;
        };
        for button in MouseButton::POLLED {
            let is_down = source.is_mouse_button_down(button);
            if record_transition(&mut self.mouse_button_states, button, is_down) {
                trace!("Mouse button {:?} {}", button, if is_down { "down" } else { "up" });
                callback(button, is_down);
            }
        }
    }

    fn poll_gamepad_buttons<S: InputSource + ?Sized>(&mut self, source: &S) {
        let Some(callback) = self.gamepad_button_callback.as_mut() else {
            return;
        };
        for gamepad in 0..self.config.max_gamepads() {
            if !source.is_gamepad_available(gamepad) {
                continue;
            }
            note_gamepad(&mut self.known_gamepads, gamepad);
            for button in GamepadButton::ALL {
                let is_down = source.is_gamepad_button_down(gamepad, button);
                if record_transition(&mut self.gamepad_button_states, (gamepad, button), is_down) {
                    trace!(
                        "Gamepad {} button {:?} {}",
                        gamepad,
                        button,
                        if is_down { "down" } else { "up" }
                    );
                    callback(gamepad, button, is_down);
                }
            }
        }
    }

    fn poll_mouse_wheel<S: InputSource + ?Sized>(&mut self, source: &S) {
        let Some(callback) = self.mouse_wheel_callback.as_mut() else {
            return;
        };
        let movement = source.mouse_wheel_move();
        if movement != 0.0 {
            self.mouse_wheel_value += movement;
            trace!("Mouse wheel {} (moved {})", self.mouse_wheel_value, movement);
            callback(self.mouse_wheel_value, movement);
        }
    }

    fn poll_gamepad_axes<S: InputSource + ?Sized>(&mut self, source: &S) {
        let Some(callback) = self.gamepad_axis_callback.as_mut() else {
            return;
        };
        for gamepad in 0..self.config.max_gamepads() {
            if !source.is_gamepad_available(gamepad) {
                continue;
            }
            note_gamepad(&mut self.known_gamepads, gamepad);
            for axis in GamepadAxis::ALL {
                let movement = source.gamepad_axis_movement(gamepad, axis);
                if movement == 0.0 {
                    continue;
                }
                let value = self.gamepad_axis_states.entry((gamepad, axis)).or_insert(0.0);
                *value += movement;
                trace!("Gamepad {} axis {:?} {} (moved {})", gamepad, axis, *value, movement);
                callback(gamepad, axis, *value, movement);
            }
        }
    }

    fn poll_mouse_position<S: InputSource + ?Sized>(&mut self, source: &S) {
        let Some(callback) = self.mouse_position_callback.as_mut() else {
            return;
        };
        let position = source.mouse_position();
        let last_position = self.mouse_position;
        match last_position {
            None => {
                debug!("Mouse position first observed at {}", position);
                self.mouse_position = Some(position);
            }
            Some(last) if last != position => {
                let delta = position - last;
                self.mouse_position = Some(position);
                trace!("Mouse moved to {} (delta {})", position, delta);
                callback(position, delta);
            }
            Some(_) => {}
        }
    }
}

impl Default for InputPoller {
    fn default() -> Self {
        Self::new()
    }
}

/// Remember an available gamepad, logging the first sighting
fn note_gamepad(known: &mut BTreeSet<GamepadId>, gamepad: GamepadId) {
    if known.insert(gamepad) {
        debug!("Gamepad {} observed", gamepad);
    }
}

/// Record `is_down` for `key`; true when a previously seen value changed
fn record_transition<K: Eq + Hash>(states: &mut HashMap<K, bool>, key: K, is_down: bool) -> bool {
    match states.entry(key) {
        Entry::Vacant(entry) => {
            entry.insert(is_down);
            false
        }
        Entry::Occupied(mut entry) => {
            if *entry.get() == is_down {
                false
            } else {
                entry.insert(is_down);
                true
            }
        }
    }
}
