//! Configuration health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that each profile loads and names a usable log filter
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Checks the `debug` and `release` profiles
    pub fn new() -> Self {
        Self::with_profiles(vec!["debug", "release"])
    }

    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates configuration loading from files and environment")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut failed = false;
        let mut warned = false;

        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) => {
                    details.push(format!(
                        "  ✓ Profile '{}': title '{}', vsync {}, log filter '{}'",
                        profile, config.window.title, config.window.vsync, config.logging.filter
                    ));
                    if tracing_subscriber::EnvFilter::try_new(&config.logging.filter).is_err() {
                        details.push(format!("  ⚠ Profile '{}': log filter does not parse", profile));
                        warned = true;
                    }
                }
                Err(e) => {
                    details.push(format!("  ✗ Profile '{}': failed to load - {}", profile, e));
                    failed = true;
                }
            }
        }

        match AppConfig::load_from_env() {
            Ok(config) => details.push(format!(
                "  ✓ Environment config: profile '{}' loaded",
                config.profile
            )),
            Err(e) => {
                details.push(format!("  ⚠ Environment config: {}", e));
                warned = true;
            }
        }

        let details = details.join("\n");
        if failed {
            CheckResult::fail("Failed to load one or more config profiles").with_details(details)
        } else if warned {
            CheckResult::warn("Config loaded with warnings").with_details(details)
        } else {
            CheckResult::pass(format!("{} profiles validated", self.profiles.len()))
                .with_details(details)
        }
    }
}
