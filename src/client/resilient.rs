//! The resilient upstream client.
//!
//! Wraps every upstream invocation with failure isolation (circuit
//! breaking), bounded retry, a hard deadline, and a deterministic
//! per-operation fallback. Composition order per call:
//! retry wrapper (read-safe paths) → breaker permit → timeout →
//! transport call → outcome recorded into the breaker → fallback mapping.

use std::time::{Duration, Instant};

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::client::error::UpstreamError;
use crate::client::transport::{RawResponse, Transport};
use crate::model::{CreateRequest, Employee, Envelope};
use crate::observability::metrics;
use crate::resilience::{BreakerSettings, CircuitBreaker, CircuitState, RetryPolicy};

/// Client for the four upstream call shapes.
///
/// Holds the breaker state for its one upstream dependency; instantiate one
/// client per upstream.
pub struct EmployeeClient<T: Transport> {
    transport: T,
    breaker: CircuitBreaker,
    retry: RetryPolicy,
    call_timeout: Duration,
}

impl<T: Transport> EmployeeClient<T> {
    pub fn new(
        transport: T,
        breaker_settings: BreakerSettings,
        retry: RetryPolicy,
        call_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            breaker: CircuitBreaker::new("employee-api", breaker_settings),
            retry,
            call_timeout,
        }
    }

    /// Fetch every employee. Never fails observably: any failure (rejected,
    /// timed out, retries exhausted, decode error) collapses to an empty
    /// list.
    pub async fn list_all(&self) -> Vec<Employee> {
        let started = Instant::now();
        match self.fetch_all().await {
            Ok(list) => {
                metrics::record_upstream_call("list_all", "success", started);
                tracing::info!(count = list.len(), "Fetched employees");
                list
            }
            Err(err) => {
                metrics::record_upstream_call("list_all", "failure", started);
                log_read_failure("list_all", &err);
                Vec::new()
            }
        }
    }

    /// Fetch one employee by id. Upstream 404 and every failure map to
    /// `None`.
    pub async fn get_by_id(&self, id: &str) -> Option<Employee> {
        let started = Instant::now();
        match self.fetch_by_id(id).await {
            Ok(found) => {
                metrics::record_upstream_call("get_by_id", "success", started);
                tracing::info!(id, found = found.is_some(), "Fetched employee");
                found
            }
            Err(err) => {
                metrics::record_upstream_call("get_by_id", "failure", started);
                log_read_failure("get_by_id", &err);
                None
            }
        }
    }

    /// Create an employee. Callers need to know creation did not happen, so
    /// every failure propagates.
    pub async fn create(&self, req: &CreateRequest) -> Result<Employee, UpstreamError> {
        let started = Instant::now();
        match self.create_inner(req).await {
            Ok(created) => {
                metrics::record_upstream_call("create", "success", started);
                tracing::info!(id = %created.id, name = ?created.name, "Created employee");
                Ok(created)
            }
            Err(err) => {
                metrics::record_upstream_call("create", "failure", started);
                tracing::error!(name = %req.name, error = %err, "Create employee failed");
                Err(err)
            }
        }
    }

    /// Delete an employee by name. Returns true only if the upstream
    /// reported the deletion succeeded; a 404 means "nothing to delete"
    /// and any other failure also collapses to false.
    pub async fn delete_by_name(&self, name: &str) -> bool {
        let started = Instant::now();
        match self.delete_inner(name).await {
            Ok(deleted) => {
                metrics::record_upstream_call("delete_by_name", "success", started);
                tracing::info!(name, deleted, "Delete by name");
                deleted
            }
            Err(err) => {
                metrics::record_upstream_call("delete_by_name", "failure", started);
                tracing::warn!(name, error = %err, "Delete by name failed");
                false
            }
        }
    }

    /// Current breaker state, exposed for tests and operational checks.
    pub fn circuit_state(&self) -> CircuitState {
        self.breaker.state()
    }

    async fn fetch_all(&self) -> Result<Vec<Employee>, UpstreamError> {
        let resp = self
            .call_with_retry("list_all", Method::GET, "/", None)
            .await?;
        if !resp.is_success() {
            return Err(application_error(resp));
        }
        let envelope: Envelope<Vec<Employee>> = decode(&resp.body)?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Employee>, UpstreamError> {
        let path = format!("/{id}");
        let resp = self
            .call_with_retry("get_by_id", Method::GET, &path, None)
            .await?;
        if resp.status == 404 {
            return Ok(None);
        }
        if !resp.is_success() {
            return Err(application_error(resp));
        }
        let envelope: Envelope<Employee> = decode(&resp.body)?;
        Ok(envelope.data)
    }

    async fn create_inner(&self, req: &CreateRequest) -> Result<Employee, UpstreamError> {
        let body = json!({
            "name": req.name,
            "salary": req.salary,
            "age": req.age,
            "title": req.title,
        });
        // Creation is idempotent by request shape in this domain, so it
        // shares the read retry policy.
        let resp = self
            .call_with_retry("create", Method::POST, "/", Some(body))
            .await?;
        if !resp.is_success() {
            return Err(application_error(resp));
        }
        let envelope: Envelope<Employee> = decode(&resp.body)?;
        envelope
            .data
            .ok_or_else(|| UpstreamError::Decode("create response carried no employee".to_string()))
    }

    async fn delete_inner(&self, name: &str) -> Result<bool, UpstreamError> {
        // At most one attempt: the remote delete is not idempotent.
        let path = format!("/{name}");
        let body = json!({ "name": name });
        let resp = self
            .attempt("delete_by_name", Method::DELETE, &path, Some(body))
            .await?;
        if resp.status == 404 {
            return Ok(false);
        }
        if !resp.is_success() {
            return Err(application_error(resp));
        }
        let envelope: Envelope<bool> = decode(&resp.body)?;
        Ok(envelope.data.unwrap_or(false))
    }

    /// Retry loop for read-safe operations. The attempt counter is scoped
    /// to this one logical invocation.
    async fn call_with_retry(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<RawResponse, UpstreamError> {
        let mut attempts_made = 0u32;
        loop {
            attempts_made += 1;
            match self
                .attempt(operation, method.clone(), path, body.clone())
                .await
            {
                Ok(resp) => return Ok(resp),
                Err(err) if self.retry.should_retry(&err, attempts_made) => {
                    let delay = self.retry.delay_before(attempts_made + 1);
                    tracing::debug!(
                        operation,
                        attempt = attempts_made,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retrying upstream call"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One attempt: breaker permit → deadline-bounded transport call →
    /// outcome recorded.
    async fn attempt(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<RawResponse, UpstreamError> {
        if !self.breaker.permit() {
            metrics::record_circuit_rejection(operation);
            return Err(UpstreamError::CircuitOpen);
        }

        let call = self.transport.send(method, path, body);
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(resp)) => {
                // 4xx is a client error, not an unhealthy upstream; only
                // 5xx counts against the breaker.
                if resp.status >= 500 {
                    self.breaker.record_failure();
                } else {
                    self.breaker.record_success();
                }
                Ok(resp)
            }
            Ok(Err(err)) => {
                self.breaker.record_failure();
                Err(UpstreamError::from_transport(err, self.call_timeout))
            }
            Err(_) => {
                self.breaker.record_failure();
                Err(UpstreamError::Timeout(self.call_timeout))
            }
        }
    }
}

fn application_error(resp: RawResponse) -> UpstreamError {
    UpstreamError::Application {
        status: resp.status,
        body: resp.body,
    }
}

fn decode<P: DeserializeOwned>(body: &str) -> Result<P, UpstreamError> {
    serde_json::from_str(body).map_err(|e| UpstreamError::Decode(e.to_string()))
}

fn log_read_failure(operation: &'static str, err: &UpstreamError) {
    match err {
        UpstreamError::CircuitOpen => {
            tracing::warn!(operation, "Circuit breaker open, returning fallback");
        }
        _ => {
            tracing::error!(operation, error = %err, "Upstream call failed, returning fallback");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::transport::TransportError;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Transport that plays back a scripted sequence of results and counts
    /// the calls it receives.
    struct ScriptedTransport {
        script: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
        calls: AtomicU32,
    }

    impl ScriptedTransport {
        fn new(script: Vec<Result<RawResponse, TransportError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Transport for &ScriptedTransport {
        async fn send(
            &self,
            _method: Method,
            _path: &str,
            _body: Option<serde_json::Value>,
        ) -> Result<RawResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(TransportError::Connect("script exhausted".into())))
        }
    }

    fn ok(status: u16, body: &str) -> Result<RawResponse, TransportError> {
        Ok(RawResponse {
            status,
            body: body.to_string(),
        })
    }

    fn refused() -> Result<RawResponse, TransportError> {
        Err(TransportError::Connect("connection refused".into()))
    }

    fn client(transport: &ScriptedTransport) -> EmployeeClient<&ScriptedTransport> {
        EmployeeClient::new(
            transport,
            BreakerSettings::default(),
            RetryPolicy::new(3, Duration::from_millis(10)),
            Duration::from_millis(500),
        )
    }

    const EMPLOYEE_JSON: &str = r#"{"data": {"id": "id-123", "employee_name": "Bill Bob",
        "employee_salary": 1000, "employee_age": 40, "employee_title": "Boss",
        "employee_email": "bill@company.com"}, "status": "200 OK"}"#;

    #[tokio::test]
    async fn list_retries_transient_failures_then_succeeds() {
        let t = ScriptedTransport::new(vec![
            refused(),
            refused(),
            ok(200, r#"{"data": [{"id": "a"}], "status": "200 OK"}"#),
        ]);
        let list = client(&t).list_all().await;
        assert_eq!(list.len(), 1);
        assert_eq!(t.calls(), 3);
    }

    #[tokio::test]
    async fn list_collapses_exhausted_retries_to_empty() {
        let t = ScriptedTransport::new(vec![refused(), refused(), refused()]);
        let list = client(&t).list_all().await;
        assert!(list.is_empty());
        assert_eq!(t.calls(), 3, "one initial attempt plus two retries");
    }

    #[tokio::test]
    async fn list_does_not_retry_application_errors() {
        let t = ScriptedTransport::new(vec![ok(500, "boom")]);
        let list = client(&t).list_all().await;
        assert!(list.is_empty());
        assert_eq!(t.calls(), 1);
    }

    #[tokio::test]
    async fn list_collapses_decode_failure_to_empty() {
        let t = ScriptedTransport::new(vec![ok(200, "not json")]);
        let list = client(&t).list_all().await;
        assert!(list.is_empty());
        assert_eq!(t.calls(), 1, "decode failures are not retried");
    }

    #[tokio::test]
    async fn get_maps_404_to_absent() {
        let t = ScriptedTransport::new(vec![ok(404, r#"{"error": "no such record"}"#)]);
        let found = client(&t).get_by_id("zzz").await;
        assert!(found.is_none());
        assert_eq!(t.calls(), 1);
    }

    #[tokio::test]
    async fn get_returns_employee_on_success() {
        let t = ScriptedTransport::new(vec![ok(200, EMPLOYEE_JSON)]);
        let found = client(&t).get_by_id("id-123").await;
        assert_eq!(found.unwrap().name.as_deref(), Some("Bill Bob"));
    }

    #[tokio::test]
    async fn create_propagates_application_errors_without_retry() {
        let t = ScriptedTransport::new(vec![ok(400, r#"{"error": "bad input"}"#)]);
        let req = CreateRequest {
            name: "X".into(),
            salary: 1,
            age: 20,
            title: "T".into(),
        };
        let err = client(&t).create(&req).await.unwrap_err();
        assert!(matches!(
            err,
            UpstreamError::Application { status: 400, .. }
        ));
        assert_eq!(t.calls(), 1);
    }

    #[tokio::test]
    async fn create_retries_transient_failures() {
        let t = ScriptedTransport::new(vec![refused(), ok(200, EMPLOYEE_JSON)]);
        let req = CreateRequest {
            name: "Bill Bob".into(),
            salary: 1000,
            age: 40,
            title: "Boss".into(),
        };
        let created = client(&t).create(&req).await.unwrap();
        assert_eq!(created.id, "id-123");
        assert_eq!(t.calls(), 2);
    }

    #[tokio::test]
    async fn create_fails_on_missing_payload() {
        let t = ScriptedTransport::new(vec![ok(200, r#"{"status": "200 OK"}"#)]);
        let req = CreateRequest {
            name: "X".into(),
            salary: 1,
            age: 20,
            title: "T".into(),
        };
        let err = client(&t).create(&req).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)));
    }

    #[tokio::test]
    async fn delete_maps_404_to_false() {
        let t = ScriptedTransport::new(vec![ok(404, r#"{"error": "gone"}"#)]);
        assert!(!client(&t).delete_by_name("Bill Bob").await);
    }

    #[tokio::test]
    async fn delete_never_retries() {
        let t = ScriptedTransport::new(vec![refused(), ok(200, r#"{"data": true}"#)]);
        assert!(!client(&t).delete_by_name("Bill Bob").await);
        assert_eq!(t.calls(), 1, "delete is attempted at most once");
    }

    #[tokio::test]
    async fn delete_reports_upstream_verdict() {
        let t = ScriptedTransport::new(vec![ok(200, r#"{"data": true}"#)]);
        assert!(client(&t).delete_by_name("Bill Bob").await);

        let t = ScriptedTransport::new(vec![ok(200, r#"{"data": false}"#)]);
        assert!(!client(&t).delete_by_name("Bill Bob").await);
    }

    #[tokio::test]
    async fn breaker_opens_after_sustained_failures_and_rejects_fast() {
        // 10 server errors fill the window; list retries don't apply to 5xx
        // so that is 10 calls.
        let t = ScriptedTransport::new(
            (0..10)
                .map(|_| ok(500, "boom"))
                .collect::<Vec<_>>(),
        );
        let c = client(&t);
        for _ in 0..10 {
            assert!(c.get_by_id("x").await.is_none());
        }
        assert_eq!(c.circuit_state(), CircuitState::Open);
        assert_eq!(t.calls(), 10);

        // Rejected without touching the transport.
        assert!(c.get_by_id("x").await.is_none());
        assert_eq!(t.calls(), 10);
    }

    #[tokio::test]
    async fn timeouts_count_as_failures_and_are_retried() {
        struct SlowTransport {
            calls: AtomicU32,
        }
        impl Transport for &SlowTransport {
            async fn send(
                &self,
                _method: Method,
                _path: &str,
                _body: Option<serde_json::Value>,
            ) -> Result<RawResponse, TransportError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(RawResponse {
                    status: 200,
                    body: String::new(),
                })
            }
        }

        let slow = SlowTransport {
            calls: AtomicU32::new(0),
        };
        let c = EmployeeClient::new(
            &slow,
            BreakerSettings::default(),
            RetryPolicy::new(3, Duration::from_millis(1)),
            Duration::from_millis(20),
        );
        let list = c.list_all().await;
        assert!(list.is_empty());
        assert_eq!(slow.calls.load(Ordering::SeqCst), 3);
    }
}
