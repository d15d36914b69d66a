//! Fixed-rate tick source
//!
//! A single-worker tokio runtime runs one task that posts
//! `SessionEvent::Tick` into the session's event stream at a fixed period.
//! The task ends on its own once the stream stops accepting events.

use std::time::Duration;

use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace};

use super::events::{EventPoster, SessionEvent};

/// Interval between ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Running tick source; stops when dropped
pub struct Ticker {
    runtime: Option<Runtime>,
    task: JoinHandle<()>,
    period: Duration,
}

impl Ticker {
    /// Starts posting ticks to `poster` every `period`, first one after one period
    pub fn start(poster: impl EventPoster, period: Duration) -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("tickdraw-ticker")
            .enable_time()
            .build()?;

        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                trace!("tick");
                if !poster.post(SessionEvent::Tick) {
                    debug!("Event stream closed, tick source stopping");
                    break;
                }
            }
        });

        debug!(period_ms = period.as_millis() as u64, "Tick source armed");

        Ok(Self {
            runtime: Some(runtime),
            task,
            period,
        })
    }

    /// The configured tick period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true once the posting task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the tick source without waiting for the worker thread
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::Disconnected;
    use tokio::sync::mpsc;

    #[test]
    fn test_ticks_arrive_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::start(tx, Duration::from_millis(2)).unwrap();

        for _ in 0..3 {
            assert_eq!(rx.blocking_recv(), Some(SessionEvent::Tick));
        }

        ticker.stop();
    }

    #[test]
    fn test_ticker_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel::<SessionEvent>();
        drop(rx);

        let ticker = Ticker::start(tx, Duration::from_millis(1)).unwrap();
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while !ticker.is_finished() && std::time::Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(1));
        }

        assert!(ticker.is_finished());
        assert_eq!(ticker.period(), Duration::from_millis(1));
    }

    #[test]
    fn test_disconnected_poster_ends_immediately() {
        let ticker = Ticker::start(Disconnected, Duration::from_millis(1)).unwrap();
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while !ticker.is_finished() && std::time::Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(ticker.is_finished());
    }
}
