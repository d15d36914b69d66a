//! tickdraw
//!
//! A fixed-rate game loop and 2D drawing surface for scripting hosts,
//! built on winit and wgpu.

/// Game session - display surface, keyboard state, and tick pacing
pub mod app;

/// Build-time information (git SHA, branch, timestamp, etc.)
pub mod build_info;

/// C ABI over a desktop session
#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub mod ffi;

/// Health checks for startup validation
pub mod health;

/// Tracing subscriber setup
pub mod logging;
