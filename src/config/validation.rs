//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, rates within 0..=1)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

fn invalid(field: &'static str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field,
        message: message.into(),
    }
}

/// Check all semantic constraints, collecting every violation.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(invalid(
            "listener.bind_address",
            format!("not a socket address: {}", config.listener.bind_address),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(invalid("listener.request_timeout_secs", "must be positive"));
    }

    if Url::parse(&config.upstream.base_url).is_err() {
        errors.push(invalid(
            "upstream.base_url",
            format!("not a valid url: {}", config.upstream.base_url),
        ));
    }
    if config.upstream.call_timeout_secs == 0 {
        errors.push(invalid("upstream.call_timeout_secs", "must be positive"));
    }

    if config.retries.max_attempts == 0 {
        errors.push(invalid("retries.max_attempts", "must be at least 1"));
    }

    if config.circuit_breaker.window_size == 0 {
        errors.push(invalid("circuit_breaker.window_size", "must be at least 1"));
    }
    if config.circuit_breaker.min_calls > config.circuit_breaker.window_size {
        errors.push(invalid(
            "circuit_breaker.min_calls",
            "cannot exceed window_size",
        ));
    }
    let rate = config.circuit_breaker.failure_rate_threshold;
    if !(rate > 0.0 && rate <= 1.0) {
        errors.push(invalid(
            "circuit_breaker.failure_rate_threshold",
            format!("must be within (0.0, 1.0], got {rate}"),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(invalid(
            "observability.metrics_address",
            format!(
                "not a socket address: {}",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
