//! Retry policy for upstream calls.
//!
//! # Responsibilities
//! - Bound the number of attempts per logical operation
//! - Classify failures: transient network errors and timeouts are
//!   retryable, decoded application errors and breaker rejections are not
//! - Fixed delay between attempts (no backoff growth)
//!
//! # Design Decisions
//! - Applies to list, get-by-id and create (idempotent by request shape);
//!   delete is attempted at most once
//! - A circuit-open rejection goes straight to the fallback, never a retry

use std::time::Duration;

use crate::client::error::UpstreamError;

/// Bounded, fixed-delay retry policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Whether another attempt should follow, given the failure and the
    /// number of attempts already made.
    pub fn should_retry(&self, error: &UpstreamError, attempts_made: u32) -> bool {
        if attempts_made >= self.max_attempts {
            return false;
        }
        matches!(
            error,
            UpstreamError::Transient(_) | UpstreamError::Timeout(_)
        )
    }

    /// Delay to wait before the next attempt.
    pub fn delay_before(&self, _next_attempt: u32) -> Duration {
        self.delay
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}
