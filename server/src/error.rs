//! API error responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use cashflow_common::CashflowError;

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request failed ledger or boundary validation.
    #[error(transparent)]
    Validation(#[from] CashflowError),

    /// Request body was not the expected JSON.
    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(e) => e.error_code(),
            ApiError::MalformedBody(_) => "MALFORMED_BODY",
        }
    }

    /// Request field at fault, when a single one is.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ApiError::Validation(e) => Some(e.field()),
            ApiError::MalformedBody(_) => None,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

/// Failure envelope, shaped like the success envelope of mutating calls.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            message: self.to_string(),
            code: self.code(),
            field: self.field(),
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
