//! Display and event backends
//!
//! A platform supplies the blocking event queue the session drains, a
//! thread-safe poster the tick source writes into, and a way to show the
//! finished canvas.

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
mod desktop;
mod headless;
#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
mod presenter;

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub use desktop::WinitPlatform;
pub use headless::{EventInjector, HeadlessPlatform, HeadlessPoster};

use super::canvas::Canvas;
use super::error::SessionError;
use super::events::{EventPoster, SessionEvent};

/// Backend a `Session` runs on
pub trait Platform {
    /// Handle the tick source posts into
    type Poster: EventPoster;

    /// Creates the display surface. Called once, before any other method.
    fn open(&mut self, width: u32, height: u32) -> Result<(), SessionError>;

    /// Returns a poster feeding the same queue `wait_event` drains
    fn poster(&self) -> Self::Poster;

    /// Blocks until the next event is available
    fn wait_event(&mut self) -> Result<SessionEvent, SessionError>;

    /// Shows the canvas on the display
    fn present(&mut self, canvas: &Canvas) -> Result<(), SessionError>;
}
