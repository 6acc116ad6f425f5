//! Facet-Fetch — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use facetfetch_core::error::DomainError;
use facetfetch_core::response::LedgerResponse;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    /// Trace exporter setup failed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Deploying the ledger or seeding genesis quests failed.
    #[error("bootstrap error: {0}")]
    Bootstrap(#[from] DomainError),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// Ledger receipt, e.g. `(err u202)`.
    pub result: LedgerResponse,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::Unauthorized { .. } => (StatusCode::FORBIDDEN, "unauthorized"),
            DomainError::InvalidRoleName(_) => (StatusCode::BAD_REQUEST, "invalid_role_name"),
            DomainError::InvalidPrincipal(_) => (StatusCode::BAD_REQUEST, "invalid_principal"),
            DomainError::InvalidQuest(_) => (StatusCode::BAD_REQUEST, "invalid_quest"),
            DomainError::QuestNotFound(_) => (StatusCode::NOT_FOUND, "quest_not_found"),
            DomainError::NotEnrolled { .. } => (StatusCode::NOT_FOUND, "not_enrolled"),
            DomainError::QuestClosed(_) => (StatusCode::CONFLICT, "quest_closed"),
            DomainError::AlreadyEnrolled { .. } => (StatusCode::CONFLICT, "already_enrolled"),
            DomainError::AlreadyDeployed(_) => (StatusCode::CONFLICT, "already_deployed"),
            DomainError::ConcurrencyConflict { .. } => {
                (StatusCode::CONFLICT, "concurrency_conflict")
            }
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
            result: LedgerResponse::from(&self.0),
        };

        (status, Json(body)).into_response()
    }
}
