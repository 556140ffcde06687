//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`episodic_common::Error`] so that route
//! handlers can return `Result<T, AppError>` and use `?` on store calls.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use episodic_common::Error;
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: Error,
    context: Option<&'static str>,
}

impl AppError {
    pub fn new(inner: Error) -> Self {
        Self {
            inner,
            context: None,
        }
    }

    /// Prefix the client-facing message, e.g. "Failed to save episode".
    pub fn with_context(mut self, context: &'static str) -> Self {
        self.context = Some(context);
        self
    }

    pub fn inner(&self) -> &Error {
        &self.inner
    }
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match self.context {
            Some(context) => format!("{}: {}", context, self.inner),
            None => self.inner.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %message,
                "Server error in API handler"
            );
        }

        let body = json!({
            "error": message,
            "code": self.inner.code(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_produces_404() {
        let err = AppError::new(Error::not_found("Episode", "abc"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn read_only_produces_503() {
        let err = AppError::new(Error::ReadOnly("mirror".into()));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn with_context() {
        let err = AppError::new(Error::storage("disk full")).with_context("Failed to save episode");
        assert_eq!(err.context, Some("Failed to save episode"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
