//! Generic response envelope used by the upstream API.

use serde::{Deserialize, Serialize};

/// Wrapper around every upstream response body.
///
/// The payload in `data` can be a single object, a list, or a primitive
/// (e.g. the boolean result of a delete). `status` is a human-readable
/// status message; `error` is only present on failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Build a success envelope, mirroring the upstream's `"200 OK"` status.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            status: Some("200 OK".to_string()),
            error: None,
        }
    }
}
