//! Per-provider circuit breaker.
//!
//! A plain failure-count breaker: it opens once the failure count reaches the
//! threshold and closes again on its own after the open duration has elapsed
//! since the last recorded failure. There is no half-open probe state; the
//! reset is all-or-nothing.

use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct BreakerState {
    failures: u32,
    last_failure: Option<Instant>,
}

#[derive(Debug)]
pub struct CircuitBreaker {
    threshold: u32,
    open_for: Duration,
    state: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(threshold: u32, open_for: Duration) -> Self {
        Self {
            threshold,
            open_for,
            state: Mutex::new(BreakerState::default()),
        }
    }

    /// Returns true while the breaker is open. Once the open duration has
    /// elapsed since the last failure the breaker resets itself and reports
    /// closed again.
    pub fn is_open(&self) -> bool {
        let mut state = self.state.lock().expect("breaker lock poisoned");

        if state.failures < self.threshold {
            return false;
        }

        match state.last_failure {
            Some(at) if at.elapsed() < self.open_for => true,
            _ => {
                state.failures = 0;
                state.last_failure = None;
                false
            }
        }
    }

    pub fn record_success(&self) {
        let mut state = self.state.lock().expect("breaker lock poisoned");
        state.failures = 0;
        state.last_failure = None;
    }

    pub fn record_failure(&self) {
        let mut state = self.state.lock().expect("breaker lock poisoned");
        state.failures += 1;
        state.last_failure = Some(Instant::now());
    }

    /// Current failure count, for status reporting
    pub fn failure_count(&self) -> u32 {
        self.state.lock().expect("breaker lock poisoned").failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_until_threshold() {
        let breaker = CircuitBreaker::new(5, Duration::from_secs(300));
        for _ in 0..4 {
            breaker.record_failure();
            assert!(!breaker.is_open());
        }
        breaker.record_failure();
        assert!(breaker.is_open());
    }

    #[test]
    fn test_success_resets_count() {
        let breaker = CircuitBreaker::new(5, Duration::from_secs(300));
        for _ in 0..4 {
            breaker.record_failure();
        }
        breaker.record_success();
        assert_eq!(breaker.failure_count(), 0);
        breaker.record_failure();
        assert!(!breaker.is_open());
    }

    #[test]
    fn test_self_reset_after_open_duration() {
        let breaker = CircuitBreaker::new(2, Duration::from_millis(20));
        breaker.record_failure();
        breaker.record_failure();
        assert!(breaker.is_open());

        std::thread::sleep(Duration::from_millis(30));
        assert!(!breaker.is_open());
        assert_eq!(breaker.failure_count(), 0);
    }
}
