//! Game session: surface, key state, and the tick-paced wait loop

use tracing::{debug, info, trace};

use super::canvas::{Canvas, Color};
use super::error::SessionError;
use super::events::SessionEvent;
use super::input::{KeyCode, KeyReleaseHandler, KeyView};
use super::platform::Platform;
use super::ticker::{TICK_INTERVAL, Ticker};

/// A single display with its input state and tick source
///
/// Drawing calls only touch the in-memory canvas; nothing reaches the
/// display until [`Session::present`].
pub struct Session<P: Platform> {
    platform: P,
    canvas: Canvas,
    keys: KeyView,
    on_key_released: Option<Box<dyn KeyReleaseHandler>>,
    running: bool,
    ticker: Option<Ticker>,
}

impl<P: Platform> Session<P> {
    /// Opens a `width` x `height` display on `platform` and arms the tick source
    pub fn initialize(mut platform: P, width: u32, height: u32) -> Result<Self, SessionError> {
        platform.open(width, height)?;
        let ticker = Ticker::start(platform.poster(), TICK_INTERVAL)?;

        info!(width, height, "Session started");

        Ok(Self {
            platform,
            canvas: Canvas::new(width, height),
            keys: KeyView::default(),
            on_key_released: None,
            running: true,
            ticker: Some(ticker),
        })
    }

    /// Replaces the key-release handler
    pub fn set_key_released_callback(&mut self, handler: impl KeyReleaseHandler + 'static) {
        self.on_key_released = Some(Box::new(handler));
    }

    /// Removes the key-release handler
    pub fn clear_key_released_callback(&mut self) {
        self.on_key_released = None;
    }

    /// Clears the whole surface to an opaque color
    pub fn fill(&mut self, color: Color) {
        self.canvas.fill(color);
    }

    /// Draws a solid ellipse centred on (x, y)
    pub fn draw_filled_ellipse(&mut self, x: i32, y: i32, rx: i32, ry: i32, color: Color) {
        self.canvas.fill_ellipse(x, y, rx, ry, color);
    }

    /// Draws an ellipse outline centred on (x, y)
    pub fn draw_ellipse(&mut self, x: i32, y: i32, rx: i32, ry: i32, color: Color) {
        self.canvas.stroke_ellipse(x, y, rx, ry, color);
    }

    /// Draws a triangle outline
    #[allow(clippy::too_many_arguments)]
    pub fn draw_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        color: Color,
    ) {
        self.canvas.stroke_triangle(x1, y1, x2, y2, x3, y3, color);
    }

    /// Shows the current surface on the display
    pub fn present(&mut self) -> Result<(), SessionError> {
        self.platform.present(&self.canvas)
    }

    /// Reports whether a raw key-code is held down
    ///
    /// Codes outside `0..KeyCode::LIMIT` are an error.
    pub fn is_key_down(&self, code: i64) -> Result<bool, SessionError> {
        Ok(self.key_down(KeyCode::try_from(code)?))
    }

    /// Reports whether `key` is held down
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys.is_down(key)
    }

    /// Shared handle on the key states, readable from inside the key-release handler
    pub fn key_view(&self) -> KeyView {
        self.keys.clone()
    }

    /// False once a quit request has been seen
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Blocks until the next tick, applying every event queued before it
    ///
    /// A quit request clears the running flag but does not end the wait;
    /// callers check [`Session::is_running`] after each tick.
    pub fn wait_for_tick(&mut self) -> Result<(), SessionError> {
        loop {
            match self.platform.wait_event()? {
                SessionEvent::Tick => {
                    trace!("Tick");
                    return Ok(());
                }
                SessionEvent::KeyDown(key) => {
                    debug!(%key, "Key down");
                    self.keys.press(key);
                }
                SessionEvent::KeyUp(key) => {
                    debug!(%key, "Key up");
                    if let Some(handler) = &mut self.on_key_released {
                        handler.key_released(key);
                    }
                    self.keys.release(key);
                }
                SessionEvent::Quit => {
                    if self.running {
                        info!("Quit requested");
                    }
                    self.running = false;
                }
                SessionEvent::Other => {}
            }
        }
    }

    /// The drawing surface
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The platform the session runs on
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Stops the tick source and tears the display down
    pub fn release(mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        info!("Session released");
    }
}
