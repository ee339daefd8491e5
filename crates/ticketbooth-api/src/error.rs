//! Ticketbooth API: error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use ticketbooth_core::error::BookingError;
use ticketbooth_inventory_client::InventoryClientError;

/// Startup errors for the API server.
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

    /// The inventory client could not be configured.
    #[error("inventory client error: {0}")]
    InventoryClient(#[from] InventoryClientError),

    /// The event publisher could not be created.
    #[error("event publisher error: {0}")]
    Publisher(#[from] BookingError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `BookingError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub BookingError);

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            BookingError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            BookingError::CustomerNotFound(_) => (StatusCode::NOT_FOUND, "customer_not_found"),
            BookingError::EventNotFound(_) => (StatusCode::NOT_FOUND, "event_not_found"),
            BookingError::InsufficientInventory { .. } => {
                (StatusCode::CONFLICT, "insufficient_inventory")
            }
            BookingError::UpstreamUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable")
            }
            BookingError::PublishFailure(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "publish_failure")
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "booking failed");
        } else {
            tracing::info!(error = %self.0, "booking rejected");
        }

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
