// Edge-triggered input callbacks over polled device state

pub mod input;

pub use input::{
    Action, ActionMap, Control, GamepadAxis, GamepadButton, GamepadId, InputError, InputPoller,
    InputSource, InputState, KeyboardKey, MouseButton, PollerConfig, WinitInput,
};
