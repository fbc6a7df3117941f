use std::thread;
use std::time::Duration;

use tracing::trace;

/// Bounded retry with a fixed delay between attempts.
///
/// The policy knows nothing about the operation it retries: callers pass the
/// operation and an acceptance predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Runs `op` until `accept` approves its result or attempts run out.
    /// Returns the accepted value, or `None` if no attempt was accepted.
    pub fn run<T, F, P>(&self, op: F, accept: P) -> Option<T>
    where
        F: FnMut() -> Option<T>,
        P: Fn(&T) -> bool,
    {
        self.run_with_sleep(op, accept, thread::sleep)
    }

    fn run_with_sleep<T, F, P, S>(&self, mut op: F, accept: P, mut sleep: S) -> Option<T>
    where
        F: FnMut() -> Option<T>,
        P: Fn(&T) -> bool,
        S: FnMut(Duration),
    {
        for attempt in 1..=self.max_attempts {
            if let Some(value) = op() {
                if accept(&value) {
                    return Some(value);
                }
            }
            trace!(attempt, max = self.max_attempts, "Attempt not accepted");
            if attempt < self.max_attempts && !self.delay.is_zero() {
                sleep(self.delay);
            }
        }
        None
    }
}
