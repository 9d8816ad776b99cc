use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Time source behind the rate limiter, swappable so tests run without
/// real waiting.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Wall clock; `sleep` blocks the calling thread.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Spaces consecutive upstream calls at least one interval apart.
///
/// A blocking wait, not a queue. The dispatcher serializes runs, so at most
/// one caller waits here at a time.
pub struct RateLimiter {
    clock: Arc<dyn Clock>,
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self::with_clock(interval, Arc::new(SystemClock))
    }

    pub fn with_clock(interval: Duration, clock: Arc<dyn Clock>) -> Self {
        RateLimiter {
            clock,
            interval,
            last_call: Mutex::new(None),
        }
    }

    /// Block until one interval has passed since the previous call, then
    /// mark this call.
    pub fn throttle(&self) {
        let mut last_call = self
            .last_call
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = *last_call {
            let elapsed = self.clock.now().duration_since(previous);
            if elapsed < self.interval {
                let wait = self.interval - elapsed;
                log::debug!("Waiting {:?} before the next upstream call", wait);
                self.clock.sleep(wait);
            }
        }
        *last_call = Some(self.clock.now());
    }
}
