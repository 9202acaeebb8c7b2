//! Employee endpoint handlers.
//!
//! Read handlers return data or an empty body and never fail observably;
//! mutating handlers surface typed failures via `GatewayError`.

use axum::extract::{Path, State};
use axum::Json;

use crate::http::server::AppState;
use crate::model::{CreateRequest, Employee};
use crate::service::GatewayError;

/// `GET /` — all employees (empty list on upstream failure).
pub async fn list_employees(State(service): State<AppState>) -> Json<Vec<Employee>> {
    tracing::info!("GET /employee");
    Json(service.all_employees().await)
}

/// `GET /search/{fragment}` — employees whose name contains the fragment.
pub async fn search_employees(
    State(service): State<AppState>,
    Path(fragment): Path<String>,
) -> Json<Vec<Employee>> {
    tracing::info!(fragment = %fragment, "GET /employee/search");
    Json(service.search_by_name(&fragment).await)
}

/// `GET /{id}` — one employee, or 404 when absent.
pub async fn get_employee(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, GatewayError> {
    tracing::info!(id = %id, "GET /employee/{{id}}");
    service
        .employee_by_id(&id)
        .await
        .map(Json)
        .ok_or(GatewayError::NotFound(id))
}

/// `GET /highestSalary` — maximum salary, 0 when unknown.
pub async fn highest_salary(State(service): State<AppState>) -> Json<u32> {
    tracing::info!("GET /employee/highestSalary");
    Json(service.highest_salary().await)
}

/// `GET /topTenHighestEarningEmployeeNames` — names, best first.
pub async fn top_earner_names(State(service): State<AppState>) -> Json<Vec<Option<String>>> {
    tracing::info!("GET /employee/topTenHighestEarningEmployeeNames");
    Json(service.top_earner_names().await)
}

/// `POST /` — create an employee; 400 on invalid input, 502 when the
/// upstream refused or was unreachable.
pub async fn create_employee(
    State(service): State<AppState>,
    Json(input): Json<CreateRequest>,
) -> Result<Json<Employee>, GatewayError> {
    tracing::info!(name = %input.name, "POST /employee");
    service.create(input).await.map(Json)
}

/// `DELETE /{id}` — delete by id; responds with the deleted employee's
/// name, 404 when the id resolves to nothing, 409 when the upstream
/// refused the delete.
pub async fn delete_employee(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, GatewayError> {
    tracing::info!(id = %id, "DELETE /employee/{{id}}");
    service.delete_by_id(&id).await
}
