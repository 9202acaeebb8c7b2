//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resilient client produces:
//!     → metrics.rs (latency histogram per operation/outcome, counters)
//!     → tracing events (structured fields, request IDs from tower-http)
//!
//! Consumers:
//!     → Metrics endpoint (Prometheus scrape)
//!     → Log aggregation (stdout)
//! ```
//!
//! # Design Decisions
//! - Metric names live in one place, this module
//! - Every upstream call is timed exactly once, on all outcome paths
//! - Circuit-breaker rejections get their own counter so sustained outages
//!   stay alertable even though reads degrade to empty results

pub mod metrics;
