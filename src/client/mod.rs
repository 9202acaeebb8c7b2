//! Upstream client subsystem.
//!
//! # Data Flow
//! ```text
//! Operation (list / get / create / delete):
//!     → resilient.rs (retry wrapper on read-safe paths)
//!     → circuit breaker permit check
//!     → timeout-bounded transport call (transport.rs)
//!     → outcome recorded into the breaker
//!     → envelope decode + per-operation fallback mapping
//!     → one latency measurement per call, success or failure
//! ```
//!
//! # Design Decisions
//! - Transport is a trait so tests can script failures without a socket
//! - Reads never fail observably (empty / absent fallback); create
//!   propagates, delete collapses to a boolean
//! - Exactly one upstream dependency; one breaker instance guards it

pub mod error;
pub mod resilient;
pub mod transport;

pub use error::UpstreamError;
pub use resilient::EmployeeClient;
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
