//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`dc_core::Error`] so that route handlers
//! can return `Result<T, AppError>` and use `?` on core results directly.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
pub struct AppError {
    inner: dc_core::Error,
}

impl AppError {
    pub fn new(inner: dc_core::Error) -> Self {
        Self { inner }
    }
}

impl From<dc_core::Error> for AppError {
    fn from(e: dc_core::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
        }

        let code = match &self.inner {
            dc_core::Error::NotFound { .. } | dc_core::Error::PathEscape { .. } => "not_found",
            dc_core::Error::InvalidRange { .. } => "invalid_range",
            dc_core::Error::Validation(_) => "validation_error",
            dc_core::Error::Io { .. } => "io_error",
            dc_core::Error::Internal(_) => "internal_error",
        };

        let body = json!({
            "error": self.inner.to_string(),
            "code": code,
        });

        let mut response = (status, axum::Json(body)).into_response();

        if let dc_core::Error::InvalidRange { size, .. } = &self.inner {
            if let Ok(value) = HeaderValue::from_str(&format!("bytes */{size}")) {
                response.headers_mut().insert(header::CONTENT_RANGE, value);
            }
        }

        response
    }
}
