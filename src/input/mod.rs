// Buffered input handling
//
// Polls device state once per frame and turns it into change callbacks, either
// per device category (`InputPoller`) or per composite gesture (`Action`).
//
// ## Architecture
//
// - `control`: Physical control identifiers and press counting
// - `source`: The device query trait and an in-memory device snapshot
// - `callback`: Callback signatures
// - `config`: Polling configuration
// - `poller`: Per-category change detection
// - `action`: Buttons, chords, combos, axes and direction vectors
// - `action_map`: Named actions pumped together
// - `backend`: winit event adapter
//
// ## Usage Example
//
// ```rust
// use buffered_input::{Action, InputPoller, WinitInput};
//
// let mut device = WinitInput::new();
// let mut poller = InputPoller::new();
// poller.set_keyboard_callback(|key, down| println!("{:?} {}", key, down));
//
// let mut movement = Action::wasd_or_arrows(true);
// movement.set_vector_callback(|dir, _| println!("moving {}", dir))?;
//
// // In your event loop, feed window events to the device
// device.process_window_event(&event);
//
// // Once per frame
// poller.poll(&device);
// movement.poll_events(&device);
// device.end_frame();
// ```

pub mod action;
pub mod action_map;
pub mod backend;
pub mod callback;
pub mod config;
pub mod control;
pub mod poller;
pub mod source;

// Re-export commonly used types
pub use action::{Action, AxisSource, Direction, Directions, GamepadAxisId, VectorSource};
pub use action_map::ActionMap;
pub use backend::WinitInput;
pub use config::PollerConfig;
pub use control::{
    Control, GamepadAxis, GamepadButton, GamepadId, KeyboardKey, MouseButton, MAX_GAMEPADS,
};
pub use poller::InputPoller;
pub use source::{InputSource, InputState};

/// Errors from building and binding actions
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Action already registered: {0}")]
    DuplicateAction(String),

    #[error("Action not found: {0}")]
    UnknownAction(String),

    #[error("Cannot bind {callback} callback to {action} action")]
    CallbackMismatch {
        callback: &'static str,
        action: &'static str,
    },

    #[error("Button action needs at least one control")]
    EmptyControlSet,
}
