//! Employee service subsystem.
//!
//! # Data Flow
//! ```text
//! Boundary request
//!     → mod.rs (EmployeeService: fetch via resilient client)
//!     → aggregate.rs (pure search / max-salary / top-N over the fetch)
//!     → error.rs (typed failures for the mutating paths)
//! ```
//!
//! # Design Decisions
//! - Read paths never fail observably; an upstream outage degrades them to
//!   empty results (logged, counted, deliberate)
//! - delete-by-id is a two-step orchestration: the upstream delete endpoint
//!   is keyed by name, so the id is resolved first, in the same workflow
//! - No state between the two steps; at-most-once, non-atomic semantics

pub mod aggregate;
pub mod error;

use crate::client::{EmployeeClient, Transport};
use crate::model::{CreateRequest, Employee};

pub use error::GatewayError;

/// Orchestrates employee operations over the resilient client.
pub struct EmployeeService<T: Transport> {
    client: EmployeeClient<T>,
}

impl<T: Transport> EmployeeService<T> {
    pub fn new(client: EmployeeClient<T>) -> Self {
        Self { client }
    }

    pub async fn all_employees(&self) -> Vec<Employee> {
        self.client.list_all().await
    }

    /// Case-insensitive substring search over employee names.
    pub async fn search_by_name(&self, fragment: &str) -> Vec<Employee> {
        let matches = aggregate::search_by_name(self.client.list_all().await, fragment);
        tracing::debug!(fragment, matches = matches.len(), "Name search");
        matches
    }

    pub async fn employee_by_id(&self, id: &str) -> Option<Employee> {
        self.client.get_by_id(id).await
    }

    /// Highest salary across all employees; 0 when there are none.
    pub async fn highest_salary(&self) -> u32 {
        let max = aggregate::max_salary(&self.client.list_all().await);
        tracing::debug!(max, "Highest salary computed");
        max
    }

    /// Names of the ten highest-paid employees, best first. Absent names
    /// are preserved as `None`.
    pub async fn top_earner_names(&self) -> Vec<Option<String>> {
        aggregate::top_n_by_salary(self.client.list_all().await, 10)
    }

    pub async fn create(&self, input: CreateRequest) -> Result<Employee, GatewayError> {
        input.validate().map_err(GatewayError::Validation)?;
        self.client
            .create(&input)
            .await
            .map_err(|err| GatewayError::Unavailable(err.to_string()))
    }

    /// Delete by id: resolve the id to a name, then delete by that name.
    ///
    /// The name used for the delete is always the one resolved in this
    /// same workflow; nothing is cached across calls. On success the
    /// resolved name is returned.
    pub async fn delete_by_id(&self, id: &str) -> Result<String, GatewayError> {
        let employee = self.client.get_by_id(id).await;
        let name = match employee.and_then(|e| e.name) {
            Some(name) => name,
            None => {
                tracing::warn!(id, "Delete aborted: employee not found");
                return Err(GatewayError::NotFound(id.to_string()));
            }
        };

        if !self.client.delete_by_name(&name).await {
            tracing::warn!(id, name = %name, "Delete refused upstream");
            return Err(GatewayError::Conflict(name));
        }

        tracing::info!(id, name = %name, "Deleted employee");
        Ok(name)
    }
}
