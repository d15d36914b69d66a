//! Event loop health check

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, anyhow};

use crate::app::{HeadlessPlatform, KeyCode, Session, TICK_INTERVAL};
use crate::health::check::{CheckResult, SystemCheck};

/// Runs a headless session and waits for real ticks from the tick source
pub struct EventLoopCheck {
    ticks: u32,
    deadline: Duration,
}

impl EventLoopCheck {
    /// Waits for three ticks within one second
    pub fn new() -> Self {
        Self {
            ticks: 3,
            deadline: Duration::from_secs(1),
        }
    }

    fn run(&self) -> anyhow::Result<Duration> {
        let (platform, injector) = HeadlessPlatform::new();
        let ticks = self.ticks;

        // The session blocks, so it runs on a worker while this thread keeps time
        let (result_tx, result_rx) = mpsc::channel();
        thread::spawn(move || {
            let result = (|| -> anyhow::Result<Duration> {
                let mut session =
                    Session::initialize(platform, 32, 32).context("failed to start session")?;
                injector.key_down(KeyCode::SPACE);

                let start = Instant::now();
                for _ in 0..ticks {
                    session.wait_for_tick().context("tick wait failed")?;
                }
                let elapsed = start.elapsed();

                if !session.key_down(KeyCode::SPACE) {
                    return Err(anyhow!("key-down was not applied by the last tick"));
                }
                session.release();
                Ok(elapsed)
            })();
            let _ = result_tx.send(result);
        });

        result_rx
            .recv_timeout(self.deadline)
            .unwrap_or_else(|_| Err(anyhow!("no {} ticks within {:?}", ticks, self.deadline)))
    }
}

impl Default for EventLoopCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for EventLoopCheck {
    fn name(&self) -> &'static str {
        "Event Loop"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates that the tick source wakes a waiting session")
    }

    fn check(&self) -> CheckResult {
        match self.run() {
            Ok(elapsed) => {
                let expected = TICK_INTERVAL * self.ticks;
                let result =
                    CheckResult::pass(format!("{} ticks in {:.1?}", self.ticks, elapsed));
                if elapsed > expected * 4 {
                    CheckResult::warn(format!(
                        "{} ticks took {:.1?}, expected about {:.1?}",
                        self.ticks, elapsed, expected
                    ))
                } else {
                    result
                }
            }
            Err(e) => CheckResult::from_error("Tick source did not wake the session", &e),
        }
    }
}
