//! Desktop platform: a winit window presented through wgpu
//!
//! The event loop is driven by pumping rather than `run_app`, so the session
//! keeps control of the calling thread. Ticks arrive as winit user events
//! through an `EventLoopProxy`, which wakes a blocked pump the same way a
//! window event does.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use super::Platform;
use super::presenter::Presenter;
use crate::app::canvas::Canvas;
use crate::app::config::WindowConfig;
use crate::app::error::SessionError;
use crate::app::events::SessionEvent;
use crate::app::input::KeyCode;
use crate::app::window::window_attributes_from_config;

/// How long `open` waits for the window to come up
const OPEN_TIMEOUT: Duration = Duration::from_secs(5);

/// Window-side state driven by the event loop
struct WindowState {
    config: WindowConfig,
    requested_size: Option<(u32, u32)>,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    open_error: Option<SessionError>,
    pending: VecDeque<SessionEvent>,
}

impl WindowState {
    fn create_window(&mut self, event_loop: &ActiveEventLoop, width: u32, height: u32) {
        let attributes = window_attributes_from_config(&self.config, width, height);

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!(error = %e, "Failed to create window");
                self.open_error = Some(SessionError::Platform(e.to_string()));
                return;
            }
        };

        let size = window.inner_size();
        info!(
            window.width = size.width,
            window.height = size.height,
            "Window created successfully"
        );

        // wgpu setup is async; winit callbacks are not
        let presenter = tokio::runtime::Runtime::new()
            .map_err(|e| SessionError::Platform(e.to_string()))
            .and_then(|runtime| {
                runtime.block_on(Presenter::new(
                    window.clone(),
                    width,
                    height,
                    self.config.vsync,
                ))
            });

        match presenter {
            Ok(presenter) => {
                info!("Presenter initialized successfully");
                self.presenter = Some(presenter);
                self.window = Some(window);
            }
            Err(e) => {
                error!(error = %e, "Failed to initialize presenter");
                self.open_error = Some(e);
            }
        }
    }
}

impl ApplicationHandler<SessionEvent> for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none()
            && self.open_error.is_none()
            && let Some((width, height)) = self.requested_size
        {
            self.create_window(event_loop, width, height);
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: SessionEvent) {
        self.pending.push_back(event);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested");
                self.pending.push_back(SessionEvent::Quit);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(new_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let Some(key) = KeyCode::from_winit(code) else {
                    debug!(?code, "Ignoring unmapped key");
                    return;
                };
                self.pending.push_back(match event.state {
                    ElementState::Pressed => SessionEvent::KeyDown(key),
                    ElementState::Released => SessionEvent::KeyUp(key),
                });
            }
            _ => {}
        }
    }
}

/// Platform backed by a real window
pub struct WinitPlatform {
    event_loop: EventLoop<SessionEvent>,
    state: WindowState,
}

impl WinitPlatform {
    /// Creates the event loop. Only one event loop may exist per process.
    pub fn new(config: WindowConfig) -> Result<Self, SessionError> {
        let event_loop = EventLoop::<SessionEvent>::with_user_event()
            .build()
            .map_err(|e| SessionError::Platform(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        Ok(Self {
            event_loop,
            state: WindowState {
                config,
                requested_size: None,
                window: None,
                presenter: None,
                open_error: None,
                pending: VecDeque::new(),
            },
        })
    }

    /// The window, once `open` has succeeded
    pub fn window(&self) -> Option<&Window> {
        self.state.window.as_deref()
    }
}

impl Platform for WinitPlatform {
    type Poster = EventLoopProxy<SessionEvent>;

    fn open(&mut self, width: u32, height: u32) -> Result<(), SessionError> {
        if width == 0 || height == 0 {
            return Err(SessionError::Platform(format!(
                "invalid surface size {width}x{height}"
            )));
        }

        self.state.requested_size = Some((width, height));
        let deadline = Instant::now() + OPEN_TIMEOUT;

        while self.state.window.is_none() {
            let status = self
                .event_loop
                .pump_app_events(Some(Duration::from_millis(10)), &mut self.state);

            if let Some(e) = self.state.open_error.take() {
                return Err(e);
            }
            if let PumpStatus::Exit(code) = status {
                return Err(SessionError::Platform(format!(
                    "event loop exited with code {code} before the window opened"
                )));
            }
            if Instant::now() >= deadline {
                return Err(SessionError::Platform(
                    "timed out waiting for the window to open".to_string(),
                ));
            }
        }

        Ok(())
    }

    fn poster(&self) -> Self::Poster {
        self.event_loop.create_proxy()
    }

    fn wait_event(&mut self) -> Result<SessionEvent, SessionError> {
        loop {
            if let Some(event) = self.state.pending.pop_front() {
                return Ok(event);
            }

            if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(None, &mut self.state) {
                debug!(code, "Event loop exited");
                return match self.state.pending.pop_front() {
                    Some(event) => Ok(event),
                    None => Err(SessionError::EventStreamClosed),
                };
            }
        }
    }

    fn present(&mut self, canvas: &Canvas) -> Result<(), SessionError> {
        let (Some(window), Some(presenter)) = (&self.state.window, &mut self.state.presenter)
        else {
            return Err(SessionError::Present("display is not open".to_string()));
        };

        window.pre_present_notify();
        presenter.present(canvas)
    }
}
