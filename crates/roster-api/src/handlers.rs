//! Employee route handlers.
//!
//! - GET    /employees         - list, optionally filtered and sorted
//! - POST   /employees         - create
//! - PUT    /employees/:name   - update every employee with that name
//! - DELETE /employees/:name   - detach-delete every employee with that name
//! - GET    /health            - store connectivity check

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use roster_core::{Employee, EmployeeRecord, ListFilter};

use crate::error::ApiError;
use crate::state::AppState;

/// Raw query parameters for the listing, validated into a [`ListFilter`].
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub position: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeList {
    pub employees: Vec<EmployeeRecord>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// GET /employees
pub async fn list_employees(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<EmployeeList>, ApiError> {
    let Query(params) = params?;
    let filter = ListFilter::from_params(
        params.position,
        params.sort_by.as_deref(),
        params.sort_order.as_deref(),
    )?;

    let employees = state.bounded(state.store.list(&filter)).await?;
    Ok(Json(EmployeeList {
        employees: employees.into_iter().map(EmployeeRecord::from).collect(),
    }))
}

/// POST /employees
pub async fn create_employee(
    State(state): State<AppState>,
    body: Result<Json<Employee>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(employee) = body?;
    state
        .bounded_write(move |store| async move { store.create(&employee).await })
        .await?;
    Ok(Json(StatusResponse::success()))
}

/// PUT /employees/:name
pub async fn update_employee(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Employee>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Path(name) = path?;
    let Json(employee) = body?;
    let updated = state
        .bounded_write(move |store| async move { store.update(&name, &employee).await })
        .await?;
    match updated {
        Some(_) => Ok(Json(StatusResponse::success())),
        None => Err(ApiError::NotFound),
    }
}

/// DELETE /employees/:name
pub async fn delete_employee(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Path(name) = path?;
    let deleted = state
        .bounded_write(move |store| async move { store.delete(&name).await })
        .await?;
    match deleted {
        Some(_) => Ok(Json(StatusResponse::success())),
        None => Err(ApiError::NotFound),
    }
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.bounded(state.store.ping()).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "healthy" }))),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

/// A known path hit with a method it does not serve.
pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": "Method not allowed" })),
    )
}

/// Any path without a route.
pub async fn unknown_route() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}
