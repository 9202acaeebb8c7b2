//! Failure taxonomy for upstream calls.

use std::time::Duration;

use crate::client::transport::TransportError;

/// Everything that can go wrong talking to the upstream service.
///
/// Only [`UpstreamError::Transient`] and [`UpstreamError::Timeout`] are
/// retry candidates; the rest propagate (or fall back) immediately.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Connection failure or other transient I/O error.
    #[error("transient network error: {0}")]
    Transient(String),

    /// The upstream answered with a non-2xx status and a decoded body.
    #[error("upstream returned status {status}: {body}")]
    Application { status: u16, body: String },

    /// Rejected without calling: the circuit breaker is open.
    #[error("circuit breaker open, call rejected")]
    CircuitOpen,

    /// The per-call deadline elapsed.
    #[error("upstream call timed out after {0:?}")]
    Timeout(Duration),

    /// The response body did not match the expected envelope shape.
    #[error("failed to decode upstream response: {0}")]
    Decode(String),
}

impl UpstreamError {
    pub(crate) fn from_transport(err: TransportError, deadline: Duration) -> Self {
        match err {
            TransportError::Connect(msg) => Self::Transient(msg),
            TransportError::Io(msg) => Self::Transient(msg),
            TransportError::Timeout => Self::Timeout(deadline),
        }
    }
}
