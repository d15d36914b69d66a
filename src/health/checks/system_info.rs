//! Host system health check

use sysinfo::System;

use crate::health::check::{CheckResult, SystemCheck};

/// Gathers OS and CPU information and looks for a display server
#[derive(Default)]
pub struct SystemInfoCheck;

impl SystemInfoCheck {
    pub fn new() -> Self {
        Self
    }

    /// Names of display-server variables set in the environment (Linux only)
    fn display_servers() -> Vec<&'static str> {
        if !cfg!(target_os = "linux") {
            return vec!["native"];
        }
        ["WAYLAND_DISPLAY", "DISPLAY"]
            .into_iter()
            .filter(|var| std::env::var_os(var).is_some())
            .collect()
    }
}

impl SystemCheck for SystemInfoCheck {
    fn name(&self) -> &'static str {
        "System Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates OS and CPU information and display availability")
    }

    fn check(&self) -> CheckResult {
        let mut sys = System::new();
        sys.refresh_cpu_all();

        let unknown = || "Unknown".to_string();
        let mut details = vec![
            format!(
                "  OS: {} {}",
                System::name().unwrap_or_else(unknown),
                System::os_version().unwrap_or_else(unknown)
            ),
            format!("  Kernel: {}", System::kernel_version().unwrap_or_else(unknown)),
        ];

        // The tick source needs a thread of its own
        let logical_cores = sys.cpus().len();
        if logical_cores == 0 {
            return CheckResult::warn("Unable to detect CPU cores").with_details(details.join("\n"));
        }
        details.push(format!("  CPU cores: {} logical", logical_cores));

        let displays = Self::display_servers();
        if displays.is_empty() {
            details.push("  ⚠ No display server found".to_string());
            return CheckResult::warn("No display; only headless sessions will work")
                .with_details(details.join("\n"));
        }
        details.push(format!("  Display: {}", displays.join(", ")));

        CheckResult::pass("System info gathered successfully").with_details(details.join("\n"))
    }
}
