//! HTTP error mapping.
//!
//! Every error becomes a JSON body of the form `{"message": "..."}`. Store
//! failures are logged with their details and answered with an opaque
//! message.

use std::time::Duration;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use roster_core::RosterError;
use roster_graph::GraphError;

pub const NOT_FOUND_MESSAGE: &str = "Employee not found";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Employee not found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(#[from] GraphError),

    #[error("Store call exceeded {0:?}")]
    Timeout(Duration),

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to clients.
    fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::NotFound => NOT_FOUND_MESSAGE.to_string(),
            Self::Store(_) | Self::Task(_) => "Internal server error".to_string(),
            Self::Timeout(_) => "Request timed out".to_string(),
        }
    }
}

impl From<RosterError> for ApiError {
    fn from(e: RosterError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Store(e) => tracing::error!(error = %e, "Store call failed"),
            Self::Task(e) => tracing::error!(error = %e, "Store task failed"),
            Self::Timeout(limit) => tracing::warn!(?limit, "Store call timed out"),
            _ => {}
        }

        let body = json!({ "message": self.public_message() });
        (self.status_code(), Json(body)).into_response()
    }
}
