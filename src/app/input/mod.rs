//! Keyboard input
//!
//! ```text
//! Platform key event → KeyCode → KeyStates
//!                                   ↓ (key-up only)
//!                           KeyReleaseHandler
//! ```

mod handler;
mod keys;
mod state;

pub use handler::KeyReleaseHandler;
pub use keys::KeyCode;
pub use state::{KeyStates, KeyView};
