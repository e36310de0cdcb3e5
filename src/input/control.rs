// Physical control identifiers and press counting

use super::source::InputSource;
use std::collections::BTreeSet;
use winit::keyboard::KeyCode;

/// Index of a connected gamepad (0..MAX_GAMEPADS)
pub type GamepadId = usize;

/// Highest number of gamepads swept by the poller
pub const MAX_GAMEPADS: usize = 16;

macro_rules! keyboard_keys {
    ($($name:ident = $code:literal => $winit:ident),* $(,)?) => {
        /// A physical keyboard key
        ///
        /// Discriminants follow the classic GLFW numbering, so ordering by key is
        /// ordering by numeric id.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum KeyboardKey {
            $($name = $code),*
        }

        impl KeyboardKey {
            /// Every key the poller sweeps, in ascending id order
            pub const ALL: &'static [KeyboardKey] = &[$(KeyboardKey::$name),*];

            /// Translate a winit physical key code
            pub fn from_key_code(code: KeyCode) -> Option<Self> {
                match code {
                    $(KeyCode::$winit => Some(KeyboardKey::$name),)*
                    _ => None,
                }
            }
        }
    };
}

keyboard_keys! {
    Space = 32 => Space,
    Apostrophe = 39 => Quote,
    Comma = 44 => Comma,
    Minus = 45 => Minus,
    Period = 46 => Period,
    Slash = 47 => Slash,
    Zero = 48 => Digit0,
    One = 49 => Digit1,
    Two = 50 => Digit2,
    Three = 51 => Digit3,
    Four = 52 => Digit4,
    Five = 53 => Digit5,
    Six = 54 => Digit6,
    Seven = 55 => Digit7,
    Eight = 56 => Digit8,
    Nine = 57 => Digit9,
    Semicolon = 59 => Semicolon,
    Equal = 61 => Equal,
    A = 65 => KeyA,
    B = 66 => KeyB,
    C = 67 => KeyC,
    D = 68 => KeyD,
    E = 69 => KeyE,
    F = 70 => KeyF,
    G = 71 => KeyG,
    H = 72 => KeyH,
    I = 73 => KeyI,
    J = 74 => KeyJ,
    K = 75 => KeyK,
    L = 76 => KeyL,
    M = 77 => KeyM,
    N = 78 => KeyN,
    O = 79 => KeyO,
    P = 80 => KeyP,
    Q = 81 => KeyQ,
    R = 82 => KeyR,
    S = 83 => KeyS,
    T = 84 => KeyT,
    U = 85 => KeyU,
    V = 86 => KeyV,
    W = 87 => KeyW,
    X = 88 => KeyX,
    Y = 89 => KeyY,
    Z = 90 => KeyZ,
    LeftBracket = 91 => BracketLeft,
    Backslash = 92 => Backslash,
    RightBracket = 93 => BracketRight,
    Grave = 96 => Backquote,
    Escape = 256 => Escape,
    Enter = 257 => Enter,
    Tab = 258 => Tab,
    Backspace = 259 => Backspace,
    Insert = 260 => Insert,
    Delete = 261 => Delete,
    Right = 262 => ArrowRight,
    Left = 263 => ArrowLeft,
    Down = 264 => ArrowDown,
    Up = 265 => ArrowUp,
    PageUp = 266 => PageUp,
    PageDown = 267 => PageDown,
    Home = 268 => Home,
    End = 269 => End,
    CapsLock = 280 => CapsLock,
    ScrollLock = 281 => ScrollLock,
    NumLock = 282 => NumLock,
    PrintScreen = 283 => PrintScreen,
    Pause = 284 => Pause,
    F1 = 290 => F1,
    F2 = 291 => F2,
    F3 = 292 => F3,
    F4 = 293 => F4,
    F5 = 294 => F5,
    F6 = 295 => F6,
    F7 = 296 => F7,
    F8 = 297 => F8,
    F9 = 298 => F9,
    F10 = 299 => F10,
    F11 = 300 => F11,
    F12 = 301 => F12,
    Kp0 = 320 => Numpad0,
    Kp1 = 321 => Numpad1,
    Kp2 = 322 => Numpad2,
    Kp3 = 323 => Numpad3,
    Kp4 = 324 => Numpad4,
    Kp5 = 325 => Numpad5,
    Kp6 = 326 => Numpad6,
    Kp7 = 327 => Numpad7,
    Kp8 = 328 => Numpad8,
    Kp9 = 329 => Numpad9,
    KpDecimal = 330 => NumpadDecimal,
    KpDivide = 331 => NumpadDivide,
    KpMultiply = 332 => NumpadMultiply,
    KpSubtract = 333 => NumpadSubtract,
    KpAdd = 334 => NumpadAdd,
    KpEnter = 335 => NumpadEnter,
    KpEqual = 336 => NumpadEqual,
    LeftShift = 340 => ShiftLeft,
    LeftControl = 341 => ControlLeft,
    LeftAlt = 342 => AltLeft,
    LeftSuper = 343 => SuperLeft,
    RightShift = 344 => ShiftRight,
    RightControl = 345 => ControlRight,
    RightAlt = 346 => AltRight,
    RightSuper = 347 => SuperRight,
    Menu = 348 => ContextMenu,
}

impl KeyboardKey {
    /// Numeric key id
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// A mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
    Middle = 2,
    Side = 3,
    Extra = 4,
    Forward = 5,
    Back = 6,
}

impl MouseButton {
    pub const ALL: [MouseButton; 7] = [
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::Side,
        MouseButton::Extra,
        MouseButton::Forward,
        MouseButton::Back,
    ];

    /// Buttons the poller sweeps, `Left..=Extra`
    pub const POLLED: [MouseButton; 5] = [
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::Side,
        MouseButton::Extra,
    ];
}

/// A gamepad button, laid out by physical position rather than label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GamepadButton {
    Unknown = 0,
    LeftFaceUp,
    LeftFaceRight,
    LeftFaceDown,
    LeftFaceLeft,
    RightFaceUp,
    RightFaceRight,
    RightFaceDown,
    RightFaceLeft,
    LeftTrigger1,
    LeftTrigger2,
    RightTrigger1,
    RightTrigger2,
    MiddleLeft,
    Middle,
    MiddleRight,
    LeftThumb,
    RightThumb,
}

impl GamepadButton {
    pub const ALL: [GamepadButton; 18] = [
        GamepadButton::Unknown,
        GamepadButton::LeftFaceUp,
        GamepadButton::LeftFaceRight,
        GamepadButton::LeftFaceDown,
        GamepadButton::LeftFaceLeft,
        GamepadButton::RightFaceUp,
        GamepadButton::RightFaceRight,
        GamepadButton::RightFaceDown,
        GamepadButton::RightFaceLeft,
        GamepadButton::LeftTrigger1,
        GamepadButton::LeftTrigger2,
        GamepadButton::RightTrigger1,
        GamepadButton::RightTrigger2,
        GamepadButton::MiddleLeft,
        GamepadButton::Middle,
        GamepadButton::MiddleRight,
        GamepadButton::LeftThumb,
        GamepadButton::RightThumb,
    ];
}

/// A gamepad analog axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GamepadAxis {
    LeftX = 0,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

impl GamepadAxis {
    pub const ALL: [GamepadAxis; 6] = [
        GamepadAxis::LeftX,
        GamepadAxis::LeftY,
        GamepadAxis::RightX,
        GamepadAxis::RightY,
        GamepadAxis::LeftTrigger,
        GamepadAxis::RightTrigger,
    ];
}

/// One physical on/off control
///
/// The derived ordering compares the variant first, then the gamepad id and
/// button for gamepad controls, which is what chord sets are sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Control {
    Keyboard(KeyboardKey),
    Mouse(MouseButton),
    Gamepad(GamepadId, GamepadButton),
}

impl Control {
    /// Create a keyboard control
    pub fn key(key: KeyboardKey) -> Self {
        Self::Keyboard(key)
    }

    /// Create a mouse button control
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }

    /// Create a gamepad button control
    pub fn gamepad(gamepad: GamepadId, button: GamepadButton) -> Self {
        Self::Gamepad(gamepad, button)
    }

    /// Ask the source whether this control is currently held
    pub fn is_pressed<S: InputSource + ?Sized>(&self, source: &S) -> bool {
        match *self {
            Control::Keyboard(key) => source.is_key_down(key),
            Control::Mouse(button) => source.is_mouse_button_down(button),
            Control::Gamepad(gamepad, button) => source.is_gamepad_button_down(gamepad, button),
        }
    }
}

impl From<KeyboardKey> for Control {
    fn from(key: KeyboardKey) -> Self {
        Self::Keyboard(key)
    }
}

impl From<MouseButton> for Control {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

impl From<(GamepadId, GamepadButton)> for Control {
    fn from((gamepad, button): (GamepadId, GamepadButton)) -> Self {
        Self::Gamepad(gamepad, button)
    }
}

/// Number of controls in the set that are currently held
pub fn count_pressed<S: InputSource + ?Sized>(controls: &BTreeSet<Control>, source: &S) -> usize {
    controls.iter().filter(|control| control.is_pressed(source)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::source::InputState;

    #[test]
    fn test_keyboard_key_codes() {
        assert_eq!(KeyboardKey::A.code(), 65);
        assert_eq!(KeyboardKey::Zero.code(), 48);
        assert_eq!(KeyboardKey::Escape.code(), 256);
        assert_eq!(KeyboardKey::F1.code(), 290);
    }

    #[test]
    fn test_keyboard_key_list_is_sorted_and_unique() {
        for pair in KeyboardKey::ALL.windows(2) {
            assert!(pair[0].code() < pair[1].code(), "{:?} before {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_key_from_winit() {
        assert_eq!(KeyboardKey::from_key_code(KeyCode::KeyW), Some(KeyboardKey::W));
        assert_eq!(KeyboardKey::from_key_code(KeyCode::ArrowUp), Some(KeyboardKey::Up));
        assert_eq!(KeyboardKey::from_key_code(KeyCode::F24), None);
    }

    #[test]
    fn test_polled_mouse_buttons_stop_at_extra() {
        assert_eq!(MouseButton::POLLED.len(), 5);
        assert_eq!(MouseButton::POLLED.last(), Some(&MouseButton::Extra));
        assert!(!MouseButton::POLLED.contains(&MouseButton::Forward));
        assert!(!MouseButton::POLLED.contains(&MouseButton::Back));
    }

    #[test]
    fn test_control_ordering_by_variant_first() {
        let key = Control::key(KeyboardKey::Menu);
        let mouse = Control::mouse(MouseButton::Left);
        let pad = Control::gamepad(0, GamepadButton::Unknown);
        assert!(key < mouse);
        assert!(mouse < pad);
    }

    #[test]
    fn test_control_ordering_gamepad_id_then_button() {
        let a = Control::gamepad(0, GamepadButton::RightThumb);
        let b = Control::gamepad(1, GamepadButton::Unknown);
        let c = Control::gamepad(1, GamepadButton::LeftFaceUp);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_control_from_conversions() {
        assert_eq!(Control::from(KeyboardKey::A), Control::Keyboard(KeyboardKey::A));
        assert_eq!(Control::from(MouseButton::Right), Control::Mouse(MouseButton::Right));
        assert_eq!(
            Control::from((2, GamepadButton::Middle)),
            Control::Gamepad(2, GamepadButton::Middle)
        );
    }

    #[test]
    fn test_is_pressed_dispatches_by_kind() {
        let mut state = InputState::new();
        state.press_key(KeyboardKey::A);
        state.press_mouse_button(MouseButton::Middle);
        state.connect_gamepad(1);
        state.set_gamepad_button(1, GamepadButton::RightFaceDown, true);

        assert!(Control::key(KeyboardKey::A).is_pressed(&state));
        assert!(!Control::key(KeyboardKey::B).is_pressed(&state));
        assert!(Control::mouse(MouseButton::Middle).is_pressed(&state));
        assert!(Control::gamepad(1, GamepadButton::RightFaceDown).is_pressed(&state));
        assert!(!Control::gamepad(0, GamepadButton::RightFaceDown).is_pressed(&state));
    }

    #[test]
    fn test_count_pressed() {
        let mut state = InputState::new();
        let set: BTreeSet<Control> = [KeyboardKey::A, KeyboardKey::B, KeyboardKey::C]
            .into_iter()
            .map(Control::from)
            .collect();

        assert_eq!(count_pressed(&set, &state), 0);
        state.press_key(KeyboardKey::A);
        state.press_key(KeyboardKey::C);
        assert_eq!(count_pressed(&set, &state), 2);
        state.press_key(KeyboardKey::B);
        assert_eq!(count_pressed(&set, &state), set.len());
    }
}
