//! Held-key tracking

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::keys::KeyCode;

/// Down/up state for every key seen since the session started
///
/// Keys that were never pressed read as up.
#[derive(Debug, Clone, Default)]
pub struct KeyStates {
    keys: HashMap<KeyCode, bool>,
}

impl KeyStates {
    /// Creates a table with every key up
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key-down transition
    pub fn press(&mut self, key: KeyCode) {
        self.keys.insert(key, true);
    }

    /// Records a key-up transition
    pub fn release(&mut self, key: KeyCode) {
        self.keys.insert(key, false);
    }

    /// Returns true if the most recent transition for `key` was a press
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    /// Iterates over keys currently held down
    pub fn held(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys
            .iter()
            .filter_map(|(key, down)| down.then_some(*key))
    }
}

/// Shared read handle on a session's key states
///
/// Clones observe the same table, so a key-release handler holding one can
/// query keys while the session is inside `wait_for_tick`.
#[derive(Debug, Clone, Default)]
pub struct KeyView(Rc<RefCell<KeyStates>>);

impl KeyView {
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.0.borrow().is_down(key)
    }

    /// Copy of the current table
    pub fn snapshot(&self) -> KeyStates {
        self.0.borrow().clone()
    }

    pub(crate) fn press(&self, key: KeyCode) {
        self.0.borrow_mut().press(key);
    }

    pub(crate) fn release(&self, key: KeyCode) {
        self.0.borrow_mut().release(key);
    }
}
