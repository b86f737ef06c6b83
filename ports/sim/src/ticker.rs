//! Millisecond tick thread
//!
//! Stands in for the SysTick interrupt: a dedicated thread advancing a
//! [`TickSource`] at a fixed rate. The thread sleeps until an absolute
//! deadline rather than for a relative duration, so scheduling jitter does
//! not accumulate into drift.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use ignition_core::TickSource;

use crate::{SimError, SimResult};

/// Tick period of the controller
pub const TICK_PERIOD: Duration = Duration::from_millis(1);

/// Running tick thread; stopped on drop
pub struct Ticker {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a thread calling `source.on_tick()` every `period`
    pub fn start(source: &'static TickSource, period: Duration) -> SimResult<Self> {
        if period.is_zero() {
            return Err(SimError::ZeroPeriod);
        }

        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let handle = thread::Builder::new()
            .name("ignition-tick".into())
            .spawn(move || ticker_thread(source, period, &flag))?;

        log::debug!("ticker started, period {:?}", period);
        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the thread and wait for it to exit
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            log::debug!("ticker stopped");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn ticker_thread(source: &TickSource, period: Duration, running: &AtomicBool) {
    let mut next_tick = Instant::now();

    while running.load(Ordering::Relaxed) {
        next_tick += period;

        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        }

        source.on_tick();
    }
}
