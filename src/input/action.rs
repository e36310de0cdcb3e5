// Composite actions - buttons, chords, combos, axes and direction vectors

use super::callback::{
    AxisCallback, GamepadButtonCallback, KeyboardCallback, MouseButtonCallback, VectorCallback,
};
use super::control::{
    count_pressed, Control, GamepadAxis, GamepadButton, GamepadId, KeyboardKey, MouseButton,
};
use super::source::InputSource;
use super::InputError;
use glam::Vec2;
use log::trace;
use std::collections::BTreeSet;
use std::fmt;

/// One analog axis on one gamepad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GamepadAxisId {
    pub gamepad: GamepadId,
    pub axis: GamepadAxis,
}

impl GamepadAxisId {
    pub fn new(gamepad: GamepadId, axis: GamepadAxis) -> Self {
        Self { gamepad, axis }
    }
}

/// Where an axis action reads its movement from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisSource {
    Gamepad(GamepadAxisId),
    MouseWheel,
}

/// Where a vector action reads its value from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VectorSource {
    /// Per-frame wheel movement on both axes
    MouseWheel,
    /// Absolute cursor position
    MousePosition,
    /// Two axes whose movements accumulate into x and y
    GamepadAxes {
        horizontal: GamepadAxisId,
        vertical: GamepadAxisId,
    },
}

/// Index into a multi-button's direction sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

/// Control sets of a multi-button
#[derive(Debug, Clone, PartialEq)]
pub enum Directions {
    /// `[positive, negative]`, reported on y and mirrored onto x
    Pair([BTreeSet<Control>; 2]),
    /// Indexed by `Direction`
    Quad([BTreeSet<Control>; 4]),
}

/// A single control or a set of controls reported through the button callbacks
pub struct ButtonAction {
    controls: BTreeSet<Control>,
    combo: bool,
    /// Number of controls held at the last poll
    last_state: usize,
    keyboard_callback: Option<KeyboardCallback>,
    mouse_button_callback: Option<MouseButtonCallback>,
    gamepad_button_callback: Option<GamepadButtonCallback>,
}

impl ButtonAction {
    fn new(controls: BTreeSet<Control>, combo: bool) -> Result<Self, InputError> {
        if controls.is_empty() {
            return Err(InputError::EmptyControlSet);
        }
        Ok(Self::from_controls(controls, combo))
    }

    /// Build without the emptiness check; callers guarantee at least one control
    fn from_controls(controls: BTreeSet<Control>, combo: bool) -> Self {
        Self {
            controls,
            combo,
            last_state: 0,
            keyboard_callback: None,
            mouse_button_callback: None,
            gamepad_button_callback: None,
        }
    }

    pub fn controls(&self) -> &BTreeSet<Control> {
        &self.controls
    }

    pub fn is_combo(&self) -> bool {
        self.combo
    }

    /// Number of controls held at the last poll
    pub fn pressed_count(&self) -> usize {
        self.last_state
    }

    /// Whether the action counts as held: any member, or all members for a combo
    pub fn is_active(&self) -> bool {
        if self.combo {
            self.last_state == self.controls.len()
        } else {
            self.last_state > 0
        }
    }

    fn pump<S: InputSource + ?Sized>(&mut self, source: &S) {
        let state = count_pressed(&self.controls, source);
        if state == self.last_state {
            return;
        }

        if self.combo {
            let total = self.controls.len();
            let combo_state = state == total;
            let last_combo_state = self.last_state == total;
            if combo_state != last_combo_state {
                trace!("Combo of {} controls now {}", total, combo_state);
                self.announce(combo_state);
            }
        } else {
            // Every member re-announces, not only the one that moved
            self.announce(state > 0);
        }
        self.last_state = state;
    }

    fn announce(&mut self, is_down: bool) {
        for control in &self.controls {
            match *control {
                Control::Keyboard(key) => {
                    if let Some(callback) = self.keyboard_callback.as_mut() {
                        callback(key, is_down);
                    }
                }
                Control::Mouse(button) => {
                    if let Some(callback) = self.mouse_button_callback.as_mut() {
                        callback(button, is_down);
                    }
                }
                Control::Gamepad(gamepad, button) => {
                    if let Some(callback) = self.gamepad_button_callback.as_mut() {
                        callback(gamepad, button, is_down);
                    }
                }
            }
        }
    }
}

/// An accumulating scalar
pub struct AxisAction {
    source: AxisSource,
    last_state: f32,
    callback: Option<AxisCallback>,
}

impl AxisAction {
    pub fn source(&self) -> AxisSource {
        self.source
    }

    /// Sum of all movement seen so far
    pub fn value(&self) -> f32 {
        self.last_state
    }

    fn pump<S: InputSource + ?Sized>(&mut self, source: &S) {
        let movement = match self.source {
            AxisSource::Gamepad(id) => source.gamepad_axis_movement(id.gamepad, id.axis),
            AxisSource::MouseWheel => source.mouse_wheel_move(),
        };
        let mut state = self.last_state;
        if movement != 0.0 {
            state += movement;
        }
        if state != self.last_state {
            let delta = state - self.last_state;
            trace!("Axis {:?} now {} (delta {})", self.source, state, delta);
            if let Some(callback) = self.callback.as_mut() {
                callback(state, delta);
            }
            self.last_state = state;
        }
    }
}

/// A sampled or accumulated 2-D value
pub struct VectorAction {
    source: VectorSource,
    last_state: Vec2,
    callback: Option<VectorCallback>,
}

impl VectorAction {
    pub fn source(&self) -> VectorSource {
        self.source
    }

    pub fn value(&self) -> Vec2 {
        self.last_state
    }

    fn pump<S: InputSource + ?Sized>(&mut self, source: &S) {
        let state = match self.source {
            VectorSource::MouseWheel => source.mouse_wheel_move_v(),
            VectorSource::MousePosition => source.mouse_position(),
            VectorSource::GamepadAxes {
                horizontal,
                vertical,
            } => {
                self.last_state
                    + Vec2::new(
                        source.gamepad_axis_movement(horizontal.gamepad, horizontal.axis),
                        source.gamepad_axis_movement(vertical.gamepad, vertical.axis),
                    )
            }
        };
        if state != self.last_state {
            let delta = state - self.last_state;
            trace!("Vector {:?} now {} (delta {})", self.source, state, delta);
            if let Some(callback) = self.callback.as_mut() {
                callback(state, delta);
            }
            self.last_state = state;
        }
    }
}

/// A direction vector synthesized from two or four sets of buttons
pub struct MultiButtonAction {
    directions: Directions,
    normalize: bool,
    last_state: Vec2,
    callback: Option<VectorCallback>,
}

impl MultiButtonAction {
    pub fn directions(&self) -> &Directions {
        &self.directions
    }

    pub fn is_normalized(&self) -> bool {
        self.normalize
    }

    pub fn value(&self) -> Vec2 {
        self.last_state
    }

    fn pump<S: InputSource + ?Sized>(&mut self, source: &S) {
        let normalize = self.normalize;
        let pressed = |set: &BTreeSet<Control>| {
            let count = count_pressed(set, source);
            if normalize && count > 0 {
                1.0
            } else {
                count as f32
            }
        };

        let state = match &self.directions {
            Directions::Quad(sets) => Vec2::new(
                pressed(&sets[Direction::Left as usize]) - pressed(&sets[Direction::Right as usize]),
                pressed(&sets[Direction::Up as usize]) - pressed(&sets[Direction::Down as usize]),
            ),
            Directions::Pair(sets) => {
                // Both components carry the pair's single axis
                let y = pressed(&sets[0]) - pressed(&sets[1]);
                Vec2::splat(y)
            }
        };

        if state != self.last_state {
            let delta = state - self.last_state;
            trace!("Multi-button now {} (delta {})", state, delta);
            if let Some(callback) = self.callback.as_mut() {
                callback(state, delta);
            }
            self.last_state = state;
        }
    }
}

/// A logical gesture built from controls or continuous sources
///
/// Each variant owns the callbacks that make sense for it and its own record
/// of what it last reported. State advances on every poll whether or not a
/// callback is bound.
pub enum Action {
    Button(ButtonAction),
    Axis(AxisAction),
    Vector(VectorAction),
    MultiButton(MultiButtonAction),
}

fn control_set<I: IntoIterator<Item = Control>>(controls: I) -> BTreeSet<Control> {
    controls.into_iter().collect()
}

impl Action {
    /// A single control
    pub fn button(control: impl Into<Control>) -> Self {
        let controls = BTreeSet::from([control.into()]);
        Self::Button(ButtonAction::from_controls(controls, false))
    }

    /// Any of several controls; every member is announced when any changes
    pub fn chord<I: IntoIterator<Item = Control>>(controls: I) -> Result<Self, InputError> {
        ButtonAction::new(control_set(controls), false).map(Self::Button)
    }

    /// All of several controls held together
    pub fn combo<I: IntoIterator<Item = Control>>(controls: I) -> Result<Self, InputError> {
        ButtonAction::new(control_set(controls), true).map(Self::Button)
    }

    pub fn gamepad_axis(gamepad: GamepadId, axis: GamepadAxis) -> Self {
        Self::axis(AxisSource::Gamepad(GamepadAxisId::new(gamepad, axis)))
    }

    pub fn mouse_wheel() -> Self {
        Self::axis(AxisSource::MouseWheel)
    }

    fn axis(source: AxisSource) -> Self {
        Self::Axis(AxisAction {
            source,
            last_state: 0.0,
            callback: None,
        })
    }

    /// Two axes on the same gamepad as one vector
    pub fn gamepad_axes(gamepad: GamepadId, horizontal: GamepadAxis, vertical: GamepadAxis) -> Self {
        Self::gamepad_axes_split(
            GamepadAxisId::new(gamepad, horizontal),
            GamepadAxisId::new(gamepad, vertical),
        )
    }

    /// Two axes, possibly on different gamepads, as one vector
    pub fn gamepad_axes_split(horizontal: GamepadAxisId, vertical: GamepadAxisId) -> Self {
        Self::vector(VectorSource::GamepadAxes {
            horizontal,
            vertical,
        })
    }

    /// The left stick of a gamepad
    pub fn left_stick(gamepad: GamepadId) -> Self {
        Self::gamepad_axes(gamepad, GamepadAxis::LeftX, GamepadAxis::LeftY)
    }

    pub fn mouse_wheel_vector() -> Self {
        Self::vector(VectorSource::MouseWheel)
    }

    pub fn mouse_position() -> Self {
        Self::vector(VectorSource::MousePosition)
    }

    fn vector(source: VectorSource) -> Self {
        Self::Vector(VectorAction {
            source,
            last_state: Vec2::ZERO,
            callback: None,
        })
    }

    /// Two control sets as one axis, reported on both x and y
    pub fn button_pair<I, J>(positive: I, negative: J, normalize: bool) -> Self
    where
        I: IntoIterator<Item = Control>,
        J: IntoIterator<Item = Control>,
    {
        Self::multi_button(
            Directions::Pair([control_set(positive), control_set(negative)]),
            normalize,
        )
    }

    /// Four control sets, in `Direction` order, as a 2-D direction
    pub fn quad_buttons<I: IntoIterator<Item = Control>>(directions: [I; 4], normalize: bool) -> Self {
        Self::multi_button(Directions::Quad(directions.map(control_set)), normalize)
    }

    /// W/S/A/D as up/down/left/right
    pub fn wasd(normalize: bool) -> Self {
        Self::quad_keys(
            [
                &[KeyboardKey::W],
                &[KeyboardKey::S],
                &[KeyboardKey::A],
                &[KeyboardKey::D],
            ],
            normalize,
        )
    }

    /// Arrow keys as up/down/left/right
    pub fn arrows(normalize: bool) -> Self {
        Self::quad_keys(
            [
                &[KeyboardKey::Up],
                &[KeyboardKey::Down],
                &[KeyboardKey::Left],
                &[KeyboardKey::Right],
            ],
            normalize,
        )
    }

    /// WASD and the arrow keys sharing one direction
    pub fn wasd_or_arrows(normalize: bool) -> Self {
        Self::quad_keys(
            [
                &[KeyboardKey::W, KeyboardKey::Up],
                &[KeyboardKey::S, KeyboardKey::Down],
                &[KeyboardKey::A, KeyboardKey::Left],
                &[KeyboardKey::D, KeyboardKey::Right],
            ],
            normalize,
        )
    }

    fn quad_keys(keys: [&[KeyboardKey]; 4], normalize: bool) -> Self {
        Self::quad_buttons(
            keys.map(|keys| keys.iter().copied().map(Control::from).collect::<Vec<_>>()),
            normalize,
        )
    }

    fn multi_button(directions: Directions, normalize: bool) -> Self {
        Self::MultiButton(MultiButtonAction {
            directions,
            normalize,
            last_state: Vec2::ZERO,
            callback: None,
        })
    }

    /// Variant name, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Button(_) => "button",
            Action::Axis(_) => "axis",
            Action::Vector(_) => "vector",
            Action::MultiButton(_) => "multi-button",
        }
    }

    fn mismatch(&self, callback: &'static str) -> InputError {
        log::warn!("Rejected {} callback on a {} action", callback, self.kind());
        InputError::CallbackMismatch {
            callback,
            action: self.kind(),
        }
    }

    /// Bind the keyboard callback of a button action
    pub fn set_keyboard_callback<F>(&mut self, callback: F) -> Result<(), InputError>
    where
        F: FnMut(KeyboardKey, bool) + 'static,
    {
        match self {
            Action::Button(button) => {
                button.keyboard_callback = Some(Box::new(callback));
                Ok(())
            }
            _ => Err(self.mismatch("keyboard")),
        }
    }

    /// Bind the mouse button callback of a button action
    pub fn set_mouse_button_callback<F>(&mut self, callback: F) -> Result<(), InputError>
    where
        F: FnMut(MouseButton, bool) + 'static,
    {
        match self {
            Action::Button(button) => {
                button.mouse_button_callback = Some(Box::new(callback));
                Ok(())
            }
            _ => Err(self.mismatch("mouse button")),
        }
    }

    /// Bind the gamepad button callback of a button action
    pub fn set_gamepad_button_callback<F>(&mut self, callback: F) -> Result<(), InputError>
    where
        F: FnMut(GamepadId, GamepadButton, bool) + 'static,
    {
        match self {
            Action::Button(button) => {
                button.gamepad_button_callback = Some(Box::new(callback));
                Ok(())
            }
            _ => Err(self.mismatch("gamepad button")),
        }
    }

    /// Bind the callback of an axis action
    pub fn set_axis_callback<F>(&mut self, callback: F) -> Result<(), InputError>
    where
        F: FnMut(f32, f32) + 'static,
    {
        match self {
            Action::Axis(axis) => {
                axis.callback = Some(Box::new(callback));
                Ok(())
            }
            _ => Err(self.mismatch("axis")),
        }
    }

    /// Bind the callback of a vector or multi-button action
    pub fn set_vector_callback<F>(&mut self, callback: F) -> Result<(), InputError>
    where
        F: FnMut(Vec2, Vec2) + 'static,
    {
        match self {
            Action::Vector(vector) => {
                vector.callback = Some(Box::new(callback));
                Ok(())
            }
            Action::MultiButton(multi) => {
                multi.callback = Some(Box::new(callback));
                Ok(())
            }
            _ => Err(self.mismatch("vector")),
        }
    }

    pub fn as_button(&self) -> Option<&ButtonAction> {
        match self {
            Action::Button(button) => Some(button),
            _ => None,
        }
    }

    pub fn as_axis(&self) -> Option<&AxisAction> {
        match self {
            Action::Axis(axis) => Some(axis),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&VectorAction> {
        match self {
            Action::Vector(vector) => Some(vector),
            _ => None,
        }
    }

    pub fn as_multi_button(&self) -> Option<&MultiButtonAction> {
        match self {
            Action::MultiButton(multi) => Some(multi),
            _ => None,
        }
    }

    /// Sample this action's sources and fire its callback if the result changed
    pub fn poll_events<S: InputSource + ?Sized>(&mut self, source: &S) {
        match self {
            Action::Button(button) => button.pump(source),
            Action::Axis(axis) => axis.pump(source),
            Action::Vector(vector) => vector.pump(source),
            Action::MultiButton(multi) => multi.pump(source),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Button(button) => f
                .debug_struct("Button")
                .field("controls", &button.controls)
                .field("combo", &button.combo)
                .field("last_state", &button.last_state)
                .field("keyboard_callback", &button.keyboard_callback.is_some())
                .field("mouse_button_callback", &button.mouse_button_callback.is_some())
                .field("gamepad_button_callback", &button.gamepad_button_callback.is_some())
                .finish(),
            Action::Axis(axis) => f
                .debug_struct("Axis")
                .field("source", &axis.source)
                .field("last_state", &axis.last_state)
                .field("callback", &axis.callback.is_some())
                .finish(),
            Action::Vector(vector) => f
                .debug_struct("Vector")
                .field("source", &vector.source)
                .field("last_state", &vector.last_state)
                .field("callback", &vector.callback.is_some())
                .finish(),
            Action::MultiButton(multi) => f
                .debug_struct("MultiButton")
                .field("directions", &multi.directions)
                .field("normalize", &multi.normalize)
                .field("last_state", &multi.last_state)
                .field("callback", &multi.callback.is_some())
                .finish(),
        }
    }
}
