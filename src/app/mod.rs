//! Game session module
//!
//! Handles the display surface, keyboard state, and the tick-paced loop.

pub mod canvas;
pub mod config;
mod error;
mod events;
pub mod input;
pub mod platform;
mod session;
mod ticker;
mod window;

pub use canvas::{Canvas, Color};
pub use config::{AppConfig, LoggingConfig, WindowConfig};
pub use error::SessionError;
pub use events::{Disconnected, EventPoster, SessionEvent};
pub use input::{KeyCode, KeyReleaseHandler, KeyStates, KeyView};
pub use platform::{EventInjector, HeadlessPlatform, Platform};
#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub use platform::WinitPlatform;
pub use session::Session;
pub use ticker::{TICK_INTERVAL, Ticker};
pub use window::window_attributes_from_config;
