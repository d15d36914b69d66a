//! Profile-based settings
//!
//! A profile is a TOML file under `config/` (`debug.toml`, `release.toml`)
//! overlaid with `APP_` environment variables.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Window configuration
///
/// The window size is not configured here; it is fixed by the width and
/// height the session is initialized with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Title bar and borders
    pub decorated: bool,
    /// Whether to wait for vertical blank when presenting
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "tickdraw".to_string(),
            decorated: true,
            vsync: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when RUST_LOG is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Settings for one profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name of the loaded profile
    pub profile: String,
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads `profile`, then applies `APP_` overrides (`APP_WINDOW__TITLE=demo`)
    ///
    /// A missing profile file is not an error; every field has a default.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let file = match Self::config_dir() {
            Some(dir) => File::from(dir.join(profile)),
            None => File::with_name(&format!("config/{profile}")),
        };

        Config::builder()
            .add_source(file.required(false))
            .add_source(Environment::with_prefix("APP").separator("__").try_parsing(true))
            .set_override("profile", profile)?
            .build()?
            .try_deserialize()
    }

    /// `config/` next to the executable (where the build script copies it),
    /// else `./config`
    fn config_dir() -> Option<PathBuf> {
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("config")));

        beside_exe
            .into_iter()
            .chain(std::iter::once(PathBuf::from("config")))
            .find(|dir| dir.is_dir())
    }

    /// Loads the profile named by `APP_PROFILE`, or `release`
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".into());
        Self::load(&profile)
    }

    /// Built-in settings, used when no configuration can be loaded
    pub fn fallback(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            window: WindowConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self::fallback("release"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_profile_uses_defaults() {
        let config = AppConfig::load("no-such-profile").unwrap();
        assert_eq!(config.profile, "no-such-profile");
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_fallback() {
        let config = AppConfig::fallback("debug");
        assert_eq!(config.profile, "debug");
        assert_eq!(config.window.title, "tickdraw");
        assert!(config.window.vsync);
        assert_eq!(config.logging.filter, "info");
    }
}
