//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`schooldir_common::Error`] so that route
//! handlers can return `Result<T, AppError>` directly. Server-side failures
//! are logged in full but reported to the client with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schooldir_common::Error;
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: Error,
    public_message: Option<&'static str>,
}

impl AppError {
    pub fn new(inner: Error) -> Self {
        Self {
            inner,
            public_message: None,
        }
    }

    /// Message shown to the client instead of the error detail on 5xx.
    pub fn with_public_message(mut self, message: &'static str) -> Self {
        self.public_message = Some(message);
        self
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

        let message = if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
            self.public_message
                .unwrap_or("Internal server error")
                .to_string()
        } else {
            tracing::debug!(status = %status, error = %self.inner, "Rejected request");
            self.inner.to_string()
        };

        let mut body = json!({
            "error": message,
            "code": self.inner.code(),
        });

        if let Error::Validation(ref errors) = self.inner {
            body["fields"] = json!(errors.fields());
        }

        (status, axum::Json(body)).into_response()
    }
}
