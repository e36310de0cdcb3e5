// winit backend - feeds window events into an input snapshot

use super::control::{GamepadAxis, GamepadButton, GamepadId, KeyboardKey, MouseButton};
use super::source::{InputSource, InputState};
use glam::Vec2;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

/// Pixel scroll distance treated as one wheel notch
const PIXELS_PER_LINE: f32 = 20.0;

/// Device state built from winit window events
///
/// winit does not report gamepads; drive them through `state_mut` from a
/// gamepad library.
#[derive(Debug, Clone, Default)]
pub struct WinitInput {
    state: InputState,
}

impl WinitInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }

    /// Process a window event from winit
    /// Returns true if the event changed input state
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event.physical_key, event.state, event.repeat)
            }
            WindowEvent::MouseInput { state, button, .. } => self.handle_mouse_button(*button, *state),
            WindowEvent::MouseWheel { delta, .. } => {
                self.handle_scroll(*delta);
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .set_mouse_position(Vec2::new(position.x as f32, position.y as f32));
                true
            }
            WindowEvent::Focused(focused) => {
                log::debug!("Window focus changed: {}", focused);
                self.state.set_focused(*focused);
                true
            }
            _ => false,
        }
    }

    /// Clear per-frame values
    /// Call once per frame after polling
    pub fn end_frame(&mut self) {
        self.state.end_frame();
    }

    fn handle_key(&mut self, key: PhysicalKey, state: ElementState, repeat: bool) -> bool {
        // Only physical key codes we have an id for
        let PhysicalKey::Code(code) = key else {
            return false;
        };
        let Some(key) = KeyboardKey::from_key_code(code) else {
            return false;
        };
        if repeat {
            return false;
        }
        self.state.set_key(key, state == ElementState::Pressed);
        true
    }

    fn handle_mouse_button(&mut self, button: winit::event::MouseButton, state: ElementState) -> bool {
        let button = match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            // Side buttons take the ids the poller sweeps
            winit::event::MouseButton::Back => MouseButton::Side,
            winit::event::MouseButton::Forward => MouseButton::Extra,
            winit::event::MouseButton::Other(_) => return false,
        };
        self.state
            .set_mouse_button(button, state == ElementState::Pressed);
        true
    }

    fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let movement = match delta {
            MouseScrollDelta::LineDelta(x, y) => Vec2::new(x, y),
            MouseScrollDelta::PixelDelta(position) => {
                Vec2::new(position.x as f32, position.y as f32) / PIXELS_PER_LINE
            }
        };
        self.state.add_wheel_move(movement);
    }
}

impl InputSource for WinitInput {
    fn is_key_down(&self, key: KeyboardKey) -> bool {
        self.state.is_key_down(key)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.state.is_mouse_button_down(button)
    }

    fn is_gamepad_button_down(&self, gamepad: GamepadId, button: GamepadButton) -> bool {
        self.state.is_gamepad_button_down(gamepad, button)
    }

    fn is_gamepad_available(&self, gamepad: GamepadId) -> bool {
        self.state.is_gamepad_available(gamepad)
    }

    fn is_window_focused(&self) -> bool {
        self.state.is_window_focused()
    }

    fn mouse_wheel_move(&self) -> f32 {
        self.state.mouse_wheel_move()
    }

    fn mouse_wheel_move_v(&self) -> Vec2 {
        self.state.mouse_wheel_move_v()
    }

    fn mouse_position(&self) -> Vec2 {
        self.state.mouse_position()
    }

    fn gamepad_axis_movement(&self, gamepad: GamepadId, axis: GamepadAxis) -> f32 {
        self.state.gamepad_axis_movement(gamepad, axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::poller::InputPoller;
    use std::cell::RefCell;
    use std::rc::Rc;
    use winit::dpi::PhysicalPosition;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_key_press_and_release() {
        let mut input = WinitInput::new();
        assert!(input.handle_key(PhysicalKey::Code(KeyCode::KeyW), ElementState::Pressed, false));
        assert!(input.is_key_down(KeyboardKey::W));

        input.handle_key(PhysicalKey::Code(KeyCode::KeyW), ElementState::Released, false);
        assert!(!input.is_key_down(KeyboardKey::W));
    }

    #[test]
    fn test_key_repeat_ignored() {
        let mut input = WinitInput::new();
        assert!(!input.handle_key(PhysicalKey::Code(KeyCode::KeyA), ElementState::Pressed, true));
        assert!(!input.is_key_down(KeyboardKey::A));
    }

    #[test]
    fn test_unmapped_key_ignored() {
        let mut input = WinitInput::new();
        assert!(!input.handle_key(PhysicalKey::Code(KeyCode::F24), ElementState::Pressed, false));
    }

    #[test]
    fn test_mouse_buttons_mapped() {
        let mut input = WinitInput::new();
        input.handle_mouse_button(winit::event::MouseButton::Back, ElementState::Pressed);
        input.handle_mouse_button(winit::event::MouseButton::Forward, ElementState::Pressed);
        assert!(input.is_mouse_button_down(MouseButton::Side));
        assert!(input.is_mouse_button_down(MouseButton::Extra));
        assert!(!input.is_mouse_button_down(MouseButton::Back));
        assert!(!input.handle_mouse_button(winit::event::MouseButton::Other(9), ElementState::Pressed));
    }

    #[test]
    fn test_scroll_deltas() {
        let mut input = WinitInput::new();
        input.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        input.handle_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 40.0)));
        assert_eq!(input.mouse_wheel_move(), 3.0);

        input.end_frame();
        assert_eq!(input.mouse_wheel_move(), 0.0);
    }

    #[test]
    fn test_focus_event() {
        let mut input = WinitInput::new();
        assert!(input.process_window_event(&WindowEvent::Focused(false)));
        assert!(!input.is_window_focused());
    }

    #[test]
    fn test_unrelated_event_ignored() {
        let mut input = WinitInput::new();
        assert!(!input.process_window_event(&WindowEvent::CloseRequested));
    }

    #[test]
    fn test_drives_poller() {
        let mut input = WinitInput::new();
        let mut poller = InputPoller::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        poller.set_keyboard_callback(move |key, down| sink.borrow_mut().push((key, down)));

        poller.poll(&input);
        input.handle_key(PhysicalKey::Code(KeyCode::ArrowUp), ElementState::Pressed, false);
        poller.poll(&input);

        assert_eq!(*log.borrow(), vec![(KeyboardKey::Up, true)]);
    }
}
