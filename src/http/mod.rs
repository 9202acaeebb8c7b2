//! HTTP boundary subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout)
//!     → handlers.rs (extract, validate, call EmployeeService)
//!     → service::error (typed failures → status codes)
//! ```
//!
//! # Design Decisions
//! - Read endpoints never fail observably (empty body / 404-on-absent only)
//! - Mutating endpoints surface typed failures: 400 / 404 / 409 / 502
//! - Request IDs generated as early as possible for tracing

pub mod handlers;
pub mod server;

pub use server::GatewayServer;
