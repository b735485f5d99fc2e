//! JSON error responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use billsplit_core::split::{SplitError, ValidationError};
use billsplit_shared::AppError;
use serde_json::json;

/// Error returned by API handlers.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    code: &'static str,
    field: Option<String>,
}

impl ApiError {
    /// Rejected input on a known request field.
    #[must_use]
    pub fn validation(err: &ValidationError) -> Self {
        Self {
            error: AppError::Validation(err.to_string()),
            code: err.error_code(),
            field: Some(err.field().to_string()),
        }
    }

    /// Returns the HTTP status of this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn message(&self) -> String {
        match &self.error {
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::MalformedRequest(msg)
            | AppError::Config(msg)
            | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        let code = error.error_code();
        Self {
            error,
            code,
            field: None,
        }
    }
}

impl From<SplitError> for ApiError {
    fn from(err: SplitError) -> Self {
        match err {
            SplitError::Validation(e) => Self::validation(&e),
            // Details stay in the log
            SplitError::InvariantViolation(_) => {
                AppError::Internal("The split could not be reconciled".to_string()).into()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            code: AppError::MalformedRequest(String::new()).error_code(),
            field: None,
            error: AppError::MalformedRequest(rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        let mut body = json!({
            "error": self.error.error_code(),
            "code": self.code,
            "message": message,
        });
        if let Some(field) = self.field {
            body["field"] = json!(field);
        }
        (status, Json(body)).into_response()
    }
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    AppError::NotFound(format!("No route for {}", uri.path())).into()
}
