//! Domain model subsystem.
//!
//! # Data Flow
//! ```text
//! Upstream JSON envelope
//!     → envelope.rs (generic { data, status, error } wrapper)
//!     → employee.rs (Employee with upstream field-name mapping)
//!
//! Boundary request body
//!     → create.rs (CreateRequest, constraint validation)
//! ```
//!
//! # Design Decisions
//! - Every Employee field except the id may be absent upstream; modeled as Option
//! - Employees are immutable once constructed; call results own them
//! - Validation runs at the boundary, before the call layer is invoked

pub mod create;
pub mod employee;
pub mod envelope;

pub use create::{CreateRequest, FieldError, MAX_AGE, MIN_AGE, MIN_SALARY};
pub use employee::Employee;
pub use envelope::Envelope;
