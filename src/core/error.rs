//! Typed error handling for the sales API
//!
//! The API distinguishes exactly two failure classes:
//!
//! - [`ApiError::InvalidDate`]: client input validation errors, surfaced as
//!   400 with a field-specific message before any store access
//! - [`ApiError::Storage`]: store/execution errors, surfaced as a generic 500
//!   with no detail leaked to the caller, logged server-side
//!
//! An empty result set is not an error; a page with zero rows and `total: 0`
//! is a normal successful response.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

/// The main error type for request handling
#[derive(Debug)]
pub enum ApiError {
    /// A date parameter did not match `YYYY-MM-DD` or is not a real date
    InvalidDate {
        /// The offending query parameter, `dateFrom` or `dateTo`
        field: &'static str,
    },

    /// The store failed (connection failure, statement error)
    Storage(anyhow::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidDate { field } => {
                write!(f, "Invalid {} format. Use YYYY-MM-DD", field)
            }
            ApiError::Storage(err) => write!(f, "storage error: {}", err),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::InvalidDate { .. } => None,
            ApiError::Storage(err) => Some(err.as_ref()),
        }
    }
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::InvalidDate { .. } => json!({
                "success": false,
                "error": self.to_string(),
            }),
            ApiError::Storage(err) => {
                // Log the real cause server-side; the caller only sees a
                // generic message.
                tracing::error!(error = %err, "request failed");
                json!({
                    "success": false,
                    "message": "internal server error",
                })
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_display() {
        let err = ApiError::InvalidDate { field: "dateFrom" };
        assert_eq!(err.to_string(), "Invalid dateFrom format. Use YYYY-MM-DD");

        let err = ApiError::InvalidDate { field: "dateTo" };
        assert_eq!(err.to_string(), "Invalid dateTo format. Use YYYY-MM-DD");
    }

    #[test]
    fn test_status_codes() {
        let err = ApiError::InvalidDate { field: "dateFrom" };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = ApiError::Storage(anyhow::anyhow!("connection refused"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_storage_error_keeps_source() {
        use std::error::Error;
        let err = ApiError::Storage(anyhow::anyhow!("connection refused"));
        assert!(err.source().is_some());
    }
}
