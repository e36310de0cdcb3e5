// Polling configuration

use super::control::MAX_GAMEPADS;

/// Settings shared by `InputPoller` and `ActionMap`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// Number of gamepad slots swept, starting from 0 (at most `MAX_GAMEPADS`)
    max_gamepads: usize,

    /// Whether `poll` keeps sampling while the window is unfocused
    poll_while_unfocused: bool,
}

impl PollerConfig {
    /// Create the default configuration: all gamepad slots, focused-only polling
    pub fn new() -> Self {
        Self {
            max_gamepads: MAX_GAMEPADS,
            poll_while_unfocused: false,
        }
    }

    /// Limit the number of gamepad slots swept
    /// Values above `MAX_GAMEPADS` are clamped
    pub fn with_max_gamepads(mut self, max_gamepads: usize) -> Self {
        if max_gamepads > MAX_GAMEPADS {
            log::warn!(
                "Requested {} gamepad slots, clamping to {}",
                max_gamepads,
                MAX_GAMEPADS
            );
        }
        self.max_gamepads = max_gamepads.min(MAX_GAMEPADS);
        self
    }

    /// Keep polling while the window is unfocused
    pub fn with_poll_while_unfocused(mut self, enabled: bool) -> Self {
        self.poll_while_unfocused = enabled;
        self
    }

    pub fn max_gamepads(&self) -> usize {
        self.max_gamepads
    }

    pub fn poll_while_unfocused(&self) -> bool {
        self.poll_while_unfocused
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self::new()
    }
}
