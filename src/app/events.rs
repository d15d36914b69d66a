//! Session event stream

use tokio::sync::mpsc;

use super::input::KeyCode;

/// Events consumed by `Session::wait_for_tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Periodic pacing event from the tick source
    Tick,
    /// A key went down (or auto-repeated while held)
    KeyDown(KeyCode),
    /// A key went up
    KeyUp(KeyCode),
    /// The user asked to close the display
    Quit,
    /// Anything else the platform reports; ignored by the session
    Other,
}

/// Thread-safe handle that can push events into a session's queue
///
/// The tick source owns one of these on its worker thread.
pub trait EventPoster: Send + 'static {
    /// Posts an event. Returns false once the receiving side is gone.
    fn post(&self, event: SessionEvent) -> bool;
}

impl EventPoster for mpsc::UnboundedSender<SessionEvent> {
    fn post(&self, event: SessionEvent) -> bool {
        self.send(event).is_ok()
    }
}

impl EventPoster for winit::event_loop::EventLoopProxy<SessionEvent> {
    fn post(&self, event: SessionEvent) -> bool {
        self.send_event(event).is_ok()
    }
}

/// Poster that accepts nothing, for platforms paced only by injected ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct Disconnected;

impl EventPoster for Disconnected {
    fn post(&self, _event: SessionEvent) -> bool {
        false
    }
}
