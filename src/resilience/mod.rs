//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to upstream:
//!     → retries.rs (read paths: check if retryable, wait fixed delay)
//!     → circuit_breaker.rs (permit, fast-fail, or single probe)
//!     → timeout enforcement in the client (every call has a deadline)
//!     → outcome recorded back into circuit_breaker.rs
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - Retries only for operations that are safe to repeat (list, get, create)
//! - Circuit breaker rejections are a fallback, never a retry candidate
//! - Breaker state is an owned, lock-guarded structure, one per upstream

pub mod circuit_breaker;
pub mod retries;

pub use circuit_breaker::{BreakerSettings, CircuitBreaker, CircuitState};
pub use retries::RetryPolicy;
