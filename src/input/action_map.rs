// Named collection of actions, pumped together once per frame

use super::action::Action;
use super::config::PollerConfig;
use super::source::InputSource;
use super::InputError;
use log::{debug, trace};
use std::collections::BTreeMap;

/// Actions keyed by name
///
/// Actions are pumped in name order, so callback order across actions is
/// stable from frame to frame.
#[derive(Debug, Default)]
pub struct ActionMap {
    config: PollerConfig,
    actions: BTreeMap<String, Action>,
}

impl ActionMap {
    /// Create an empty map with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PollerConfig) -> Self {
        Self {
            config,
            actions: BTreeMap::new(),
        }
    }

    /// Add a named action
    /// Fails if the name is already taken
    pub fn insert(&mut self, name: impl Into<String>, action: Action) -> Result<(), InputError> {
        let name = name.into();
        if self.actions.contains_key(&name) {
            return Err(InputError::DuplicateAction(name));
        }
        debug!("Registered {} action '{}'", action.kind(), name);
        self.actions.insert(name, action);
        Ok(())
    }

    /// Add or overwrite a named action, returning the previous one
    pub fn replace(&mut self, name: impl Into<String>, action: Action) -> Option<Action> {
        self.actions.insert(name.into(), action)
    }

    /// Remove a named action
    pub fn remove(&mut self, name: &str) -> Result<Action, InputError> {
        self.actions
            .remove(name)
            .ok_or_else(|| InputError::UnknownAction(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Action> {
        self.actions.get_mut(name)
    }

    /// Get a named action or fail with `UnknownAction`
    pub fn action_mut(&mut self, name: &str) -> Result<&mut Action, InputError> {
        self.actions
            .get_mut(name)
            .ok_or_else(|| InputError::UnknownAction(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Action names in pump order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Poll using the configured focus policy
    pub fn poll<S: InputSource + ?Sized>(&mut self, source: &S) {
        let while_unfocused = self.config.poll_while_unfocused();
        self.poll_events(source, while_unfocused);
    }

    /// Pump every action in name order
    /// Skipped entirely while unfocused unless `while_unfocused` is set
    pub fn poll_events<S: InputSource + ?Sized>(&mut self, source: &S, while_unfocused: bool) {
        if !while_unfocused && !source.is_window_focused() {
            trace!("Window unfocused, skipping action poll");
            return;
        }
        for (name, action) in &mut self.actions {
            trace!("Pumping action '{}'", name);
            action.poll_events(source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::control::KeyboardKey;
    use crate::input::source::InputState;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_insert_and_get() {
        let mut map = ActionMap::new();
        map.insert("jump", Action::button(KeyboardKey::Space)).unwrap();

        assert!(map.contains("jump"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("jump").unwrap().kind(), "button");
        assert!(map.get("duck").is_none());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut map = ActionMap::new();
        map.insert("zoom", Action::mouse_wheel()).unwrap();
        let err = map.insert("zoom", Action::mouse_wheel()).unwrap_err();

        assert!(matches!(err, InputError::DuplicateAction(ref name) if name == "zoom"));
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut map = ActionMap::new();
        assert!(map.replace("aim", Action::mouse_position()).is_none());
        let previous = map.replace("aim", Action::left_stick(0)).unwrap();

        assert_eq!(previous.kind(), "vector");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_unknown() {
        let mut map = ActionMap::new();
        assert!(matches!(
            map.remove("missing"),
            Err(InputError::UnknownAction(_))
        ));
        assert!(map.action_mut("missing").is_err());
    }

    #[test]
    fn test_names_are_sorted() {
        let mut map = ActionMap::new();
        map.insert("move", Action::wasd(true)).unwrap();
        map.insert("fire", Action::button(KeyboardKey::F)).unwrap();
        map.insert("look", Action::mouse_position()).unwrap();

        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, vec!["fire", "look", "move"]);
    }

    #[test]
    fn test_poll_pumps_in_name_order() {
        let mut map = ActionMap::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let mut second = Action::button(KeyboardKey::B);
        let sink = Rc::clone(&order);
        second
            .set_keyboard_callback(move |_, _| sink.borrow_mut().push("b-action"))
            .unwrap();
        let mut first = Action::button(KeyboardKey::A);
        let sink = Rc::clone(&order);
        first
            .set_keyboard_callback(move |_, _| sink.borrow_mut().push("a-action"))
            .unwrap();
        map.insert("second", second).unwrap();
        map.insert("first", first).unwrap();

        let mut state = InputState::new();
        state.press_key(KeyboardKey::A);
        state.press_key(KeyboardKey::B);
        map.poll_events(&state, false);

        assert_eq!(*order.borrow(), vec!["a-action", "b-action"]);
    }

    #[test]
    fn test_unfocused_poll_leaves_actions_untouched() {
        let mut map = ActionMap::new();
        map.insert("move", Action::wasd(true)).unwrap();
        let mut state = InputState::new();
        state.set_focused(false);
        state.press_key(KeyboardKey::W);

        map.poll(&state);
        let value = map.get("move").unwrap().as_multi_button().unwrap().value();
        assert_eq!(value, Vec2::ZERO);

        state.set_focused(true);
        map.poll(&state);
        let value = map.get("move").unwrap().as_multi_button().unwrap().value();
        assert_eq!(value, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_bind_through_action_mut() {
        let mut map = ActionMap::new();
        map.insert("scroll", Action::mouse_wheel()).unwrap();
        let total = Rc::new(RefCell::new(0.0));
        let sink = Rc::clone(&total);
        map.action_mut("scroll")
            .unwrap()
            .set_axis_callback(move |value, _| *sink.borrow_mut() = value)
            .unwrap();

        let mut state = InputState::new();
        state.add_wheel_move(Vec2::new(0.0, 3.0));
        map.poll_events(&state, false);

        assert_eq!(*total.borrow(), 3.0);
    }
}
