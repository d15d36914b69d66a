//! Window-less platform backed by an in-process channel
//!
//! Used by the test suite and health checks: events are injected through an
//! [`EventInjector`] instead of coming from a real display.

use tokio::sync::mpsc;
use tracing::debug;

use super::Platform;
use crate::app::canvas::Canvas;
use crate::app::error::SessionError;
use crate::app::events::{EventPoster, SessionEvent};
use crate::app::input::KeyCode;

/// Cloneable handle for feeding events into a [`HeadlessPlatform`]
#[derive(Debug, Clone)]
pub struct EventInjector {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl EventInjector {
    /// Queues an event. Returns false once the platform is gone.
    pub fn send(&self, event: SessionEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.send(SessionEvent::KeyDown(key))
    }

    pub fn key_up(&self, key: KeyCode) -> bool {
        self.send(SessionEvent::KeyUp(key))
    }

    pub fn quit(&self) -> bool {
        self.send(SessionEvent::Quit)
    }

    pub fn tick(&self) -> bool {
        self.send(SessionEvent::Tick)
    }
}

/// Poster handed to the tick source
#[derive(Debug, Clone)]
pub struct HeadlessPoster(Option<mpsc::UnboundedSender<SessionEvent>>);

impl EventPoster for HeadlessPoster {
    fn post(&self, event: SessionEvent) -> bool {
        match &self.0 {
            Some(tx) => tx.send(event).is_ok(),
            None => false,
        }
    }
}

/// Platform whose display is a copy of the last presented canvas
pub struct HeadlessPlatform {
    rx: mpsc::UnboundedReceiver<SessionEvent>,
    tick_tx: Option<mpsc::UnboundedSender<SessionEvent>>,
    size: Option<(u32, u32)>,
    frames_presented: u64,
    last_frame: Option<Canvas>,
}

impl HeadlessPlatform {
    /// Platform paced by the session's tick source
    pub fn new() -> (Self, EventInjector) {
        let (tx, rx) = mpsc::unbounded_channel();
        let platform = Self::from_parts(rx, Some(tx.clone()));
        (platform, EventInjector { tx })
    }

    /// Platform that only sees ticks sent through the injector
    ///
    /// The session still arms its tick source, but the source has nowhere to
    /// post and stops after its first period.
    pub fn manual() -> (Self, EventInjector) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::from_parts(rx, None), EventInjector { tx })
    }

    fn from_parts(
        rx: mpsc::UnboundedReceiver<SessionEvent>,
        tick_tx: Option<mpsc::UnboundedSender<SessionEvent>>,
    ) -> Self {
        Self {
            rx,
            tick_tx,
            size: None,
            frames_presented: 0,
            last_frame: None,
        }
    }

    /// Size passed to `open`, if the platform has been opened
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Number of successful `present` calls
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// The canvas as of the most recent `present`
    pub fn last_frame(&self) -> Option<&Canvas> {
        self.last_frame.as_ref()
    }
}

impl Platform for HeadlessPlatform {
    type Poster = HeadlessPoster;

    fn open(&mut self, width: u32, height: u32) -> Result<(), SessionError> {
        debug!(width, height, "Headless display opened");
        self.size = Some((width, height));
        Ok(())
    }

    fn poster(&self) -> Self::Poster {
        HeadlessPoster(self.tick_tx.clone())
    }

    fn wait_event(&mut self) -> Result<SessionEvent, SessionError> {
        self.rx.blocking_recv().ok_or(SessionError::EventStreamClosed)
    }

    fn present(&mut self, canvas: &Canvas) -> Result<(), SessionError> {
        match &mut self.last_frame {
            Some(frame) => frame.clone_from(canvas),
            None => self.last_frame = Some(canvas.clone()),
        }
        self.frames_presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injected_events_arrive_in_order() {
        let (mut platform, injector) = HeadlessPlatform::manual();
        injector.key_down(KeyCode::SPACE);
        injector.quit();
        injector.tick();

        assert_eq!(platform.wait_event().unwrap(), SessionEvent::KeyDown(KeyCode::SPACE));
        assert_eq!(platform.wait_event().unwrap(), SessionEvent::Quit);
        assert_eq!(platform.wait_event().unwrap(), SessionEvent::Tick);
    }

    #[test]
    fn test_stream_closes_when_injectors_dropped() {
        let (mut platform, injector) = HeadlessPlatform::manual();
        drop(injector);

        assert!(matches!(
            platform.wait_event(),
            Err(SessionError::EventStreamClosed)
        ));
    }

    #[test]
    fn test_manual_poster_is_disconnected() {
        let (platform, _injector) = HeadlessPlatform::manual();
        assert!(!platform.poster().post(SessionEvent::Tick));

        let (platform, _injector) = HeadlessPlatform::new();
        assert!(platform.poster().post(SessionEvent::Tick));
    }

    #[test]
    fn test_present_keeps_last_frame() {
        let (mut platform, _injector) = HeadlessPlatform::manual();
        let mut canvas = Canvas::new(2, 2);

        platform.present(&canvas).unwrap();
        canvas.fill(crate::app::canvas::Color::WHITE);
        platform.present(&canvas).unwrap();

        assert_eq!(platform.frames_presented(), 2);
        assert_eq!(platform.last_frame(), Some(&canvas));
    }
}
