//! Built-in health checks

pub mod build_info;
pub mod canvas;
pub mod config;
pub mod event_loop;
pub mod system_info;

pub use build_info::BuildInfoCheck;
pub use canvas::CanvasCheck;
pub use config::ConfigCheck;
pub use event_loop::EventLoopCheck;
pub use system_info::SystemInfoCheck;
