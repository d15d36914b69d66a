//! Key-release handler capability

use super::keys::KeyCode;

/// Receives key-up notifications while the session drains its event queue
///
/// The handler runs synchronously inside `Session::wait_for_tick`, before the
/// key's state flips to up. A handler that needs key state can hold a
/// `KeyView` from `Session::key_view`.
///
/// Any `FnMut(KeyCode)` closure is a handler.
pub trait KeyReleaseHandler {
    /// Called once per key-up event
    fn key_released(&mut self, key: KeyCode);
}

impl<F> KeyReleaseHandler for F
where
    F: FnMut(KeyCode),
{
    fn key_released(&mut self, key: KeyCode) {
        self(key)
    }
}
