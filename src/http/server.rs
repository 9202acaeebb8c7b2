//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the resilient client from configuration
//! - Create the Axum router with all employee handlers
//! - Wire up middleware (request ID, tracing, request timeout)
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderName;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::client::transport::TransportSetupError;
use crate::client::{EmployeeClient, HttpTransport};
use crate::config::schema::GatewayConfig;
use crate::http::handlers;
use crate::resilience::{BreakerSettings, RetryPolicy};
use crate::service::EmployeeService;

/// Shared handler state: the service over the real upstream transport.
pub type AppState = Arc<EmployeeService<HttpTransport>>;

/// HTTP server for the employee gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Build the full stack: transport → resilient client → service →
    /// router.
    pub fn new(config: &GatewayConfig) -> Result<Self, TransportSetupError> {
        let transport = HttpTransport::from_config(&config.upstream)?;
        let client = EmployeeClient::new(
            transport,
            BreakerSettings {
                window_size: config.circuit_breaker.window_size,
                min_calls: config.circuit_breaker.min_calls,
                failure_rate_threshold: config.circuit_breaker.failure_rate_threshold,
                cooldown: Duration::from_secs(config.circuit_breaker.cooldown_secs),
            },
            RetryPolicy::new(
                config.retries.max_attempts,
                Duration::from_millis(config.retries.delay_ms),
            ),
            Duration::from_secs(config.upstream.call_timeout_secs),
        );
        let service = Arc::new(EmployeeService::new(client));

        Ok(Self {
            router: Self::build_router(config, service),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let x_request_id = HeaderName::from_static("x-request-id");

        let employee_routes = Router::new()
            .route(
                "/",
                get(handlers::list_employees).post(handlers::create_employee),
            )
            .route("/search/{fragment}", get(handlers::search_employees))
            .route("/highestSalary", get(handlers::highest_salary))
            .route(
                "/topTenHighestEarningEmployeeNames",
                get(handlers::top_earner_names),
            )
            .route(
                "/{id}",
                get(handlers::get_employee).delete(handlers::delete_employee),
            )
            .with_state(state);

        Router::new()
            .nest("/api/v1/employee", employee_routes)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
