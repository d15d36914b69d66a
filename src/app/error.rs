//! Session error type

/// Errors surfaced by a game session and its platform
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The windowing or graphics layer could not be brought up
    #[error("platform initialization failed: {0}")]
    Platform(String),

    /// The tick source could not be armed
    #[error("failed to start tick source: {0}")]
    Ticker(#[from] std::io::Error),

    /// Publishing the surface to the display failed
    #[error("failed to present surface: {0}")]
    Present(String),

    /// A raw key-code outside the supported key-symbol range
    #[error("key code {code} is outside the valid range 0..{limit}")]
    InvalidKeyCode { code: i64, limit: u16 },

    /// Every producer of the event stream has gone away
    #[error("event stream closed")]
    EventStreamClosed,
}
