//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::Request;
use axum::response::Response;
use axum::Router;
use serde::Serialize;

use employee_gateway::client::{EmployeeClient, HttpTransport};
use employee_gateway::config::schema::UpstreamConfig;
use employee_gateway::model::{Employee, Envelope};
use employee_gateway::resilience::{BreakerSettings, RetryPolicy};
use employee_gateway::service::EmployeeService;

/// Start a programmable mock upstream speaking the envelope protocol.
///
/// The handler receives (method, raw path, body) and returns a status and
/// a response body.
pub async fn start_mock_upstream<F, Fut>(handler: F) -> SocketAddr
where
    F: Fn(String, String, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    let app = Router::new().fallback(move |req: Request| {
        let handler = handler.clone();
        async move {
            let method = req.method().to_string();
            let path = req.uri().path().to_string();
            let bytes = axum::body::to_bytes(req.into_body(), 1024 * 1024)
                .await
                .unwrap_or_default();
            let (status, body) = handler(
                method,
                path,
                String::from_utf8_lossy(&bytes).into_owned(),
            )
            .await;
            Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap()
        }
    });

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Serialize a payload into the upstream's success envelope.
#[allow(dead_code)]
pub fn envelope_json<T: Serialize>(data: T) -> String {
    serde_json::to_string(&Envelope::ok(data)).unwrap()
}

#[allow(dead_code)]
pub fn employee(id: &str, name: &str, salary: u32) -> Employee {
    Employee {
        id: id.to_string(),
        name: Some(name.to_string()),
        salary: Some(salary),
        age: Some(30),
        title: Some("Engineer".to_string()),
        email: Some(format!("{id}@company.com")),
    }
}

/// Client with test-friendly deadlines against the given mock upstream.
#[allow(dead_code)]
pub fn test_client(
    addr: SocketAddr,
    call_timeout: Duration,
    retry: RetryPolicy,
    breaker: BreakerSettings,
) -> EmployeeClient<HttpTransport> {
    let transport = HttpTransport::from_config(&UpstreamConfig {
        base_url: format!("http://{addr}"),
        connect_timeout_ms: 500,
        call_timeout_secs: call_timeout.as_secs().max(1),
    })
    .unwrap();
    EmployeeClient::new(transport, breaker, retry, call_timeout)
}

#[allow(dead_code)]
pub fn test_service(addr: SocketAddr) -> EmployeeService<HttpTransport> {
    EmployeeService::new(test_client(
        addr,
        Duration::from_secs(1),
        RetryPolicy::new(3, Duration::from_millis(20)),
        BreakerSettings::default(),
    ))
}
