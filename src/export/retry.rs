//! Bounded retry with a fixed delay.

use std::time::Duration;

use tracing::warn;

use crate::error::{PosterError, Result};

/// Waits between attempts. Injected so tests do not sleep.
pub trait Sleeper {
    fn sleep(&self, delay: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never less than one.
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

/// The last error after every attempt failed.
#[derive(Debug)]
pub struct Exhausted {
    pub attempts: u32,
    pub last: PosterError,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `op` until it succeeds or the attempts run out. `op` receives the
    /// 1-based attempt number.
    pub fn run<T>(
        &self,
        sleeper: &dyn Sleeper,
        mut op: impl FnMut(u32) -> Result<T>,
    ) -> std::result::Result<T, Exhausted> {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if attempt < attempts => {
                    warn!(attempt, max = attempts, error = %e, "attempt failed, retrying");
                    sleeper.sleep(self.delay);
                    attempt += 1;
                }
                Err(e) => {
                    warn!(attempt, error = %e, "final attempt failed");
                    return Err(Exhausted { attempts, last: e });
                }
            }
        }
    }
}
