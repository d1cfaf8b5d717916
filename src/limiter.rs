//! Per-provider call spacing.
//!
//! Enforces a minimum interval between calls to the same provider by sleeping
//! the caller for the remaining delta instead of rejecting the call. Under
//! concurrent access this is best-effort throttling, not mutual exclusion:
//! two tasks that read the last-call stamp at the same moment may both
//! proceed.

use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Sleep until the minimum interval since the previous call has passed,
    /// then stamp the current time as the last call.
    pub async fn wait_if_needed(&self) {
        let wait = {
            let last_call = self.last_call.lock().expect("limiter lock poisoned");
            last_call.map(|at| {
                let elapsed = at.elapsed();
                self.min_interval.saturating_sub(elapsed)
            })
        };

        if let Some(wait) = wait {
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
        }

        let mut last_call = self.last_call.lock().expect("limiter lock poisoned");
        *last_call = Some(Instant::now());
    }
}
