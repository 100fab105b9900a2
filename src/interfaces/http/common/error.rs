//! Error responses
//!
//! Failures are returned as `{"message": "..."}`, with store details in an
//! optional `error` field for 500 responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Body of every non-2xx response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable description
    pub message: String,
    /// Underlying store error, when there is one worth exposing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An HTTP status paired with an [`ErrorBody`].
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                message: message.into(),
                error: None,
            },
        }
    }

    /// 400 carrying the underlying error message (write paths).
    pub fn bad_request(err: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.to_string())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500 with a generic message plus the store error (read paths).
    pub fn internal(message: impl Into<String>, err: &DomainError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                message: message.into(),
                error: Some(err.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = ?self.body.error, "{}", self.body.message);
        } else {
            tracing::debug!(status = %self.status, "{}", self.body.message);
        }
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_keeps_underlying_message() {
        let err = ApiError::bad_request(DomainError::Validation("client_id is required".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.message, "Validation: client_id is required");
        assert!(err.body.error.is_none());
    }

    #[test]
    fn internal_exposes_details_separately() {
        let err = ApiError::internal(
            "Error fetching reservations",
            &DomainError::Storage("disk full".into()),
        );
        let json = serde_json::to_value(&err.body).unwrap();
        assert_eq!(json["message"], "Error fetching reservations");
        assert_eq!(json["error"], "Storage error: disk full");
    }

    #[test]
    fn not_found_omits_error_field() {
        let json = serde_json::to_value(&ApiError::not_found("Reservation not found").body).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Reservation not found"}));
    }
}
