//! Error types for web handlers.
//!
//! [`AppError`] bridges domain and runtime errors to HTTP responses with a
//! JSON body `{"code": ..., "message": ...}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use classbook_core::booking::{BookingError, ErrorKind};
use classbook_runtime::StoreError;
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// async fn handler() -> Result<Json<Member>, AppError> {
///     let member = find(&mobile).ok_or_else(|| AppError::not_found("Member", &mobile))?;
///     Ok(Json(member))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: String,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: code.into(),
        }
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} {id} not found"),
            "NOT_FOUND",
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message,
            "INTERNAL_SERVER_ERROR",
        )
    }

    /// Create a 503 Service Unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            message,
            "SERVICE_UNAVAILABLE",
        )
    }

    /// HTTP status of the response
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// User-facing message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                code = %self.code,
                message = %self.message,
                "Server error"
            );
        } else {
            tracing::debug!(status = %self.status, code = %self.code, "Request failed");
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Stable code for each domain error, for clients that branch on failures.
const fn booking_error_code(error: &BookingError) -> &'static str {
    match error {
        BookingError::MissingField { .. } => "MISSING_FIELD",
        BookingError::InvalidDate { .. } => "INVALID_DATE",
        BookingError::InvalidRange { .. } => "INVALID_RANGE",
        BookingError::RangeTooLong { .. } => "RANGE_TOO_LONG",
        BookingError::InvalidCapacity(_) => "INVALID_CAPACITY",
        BookingError::MemberExists(_) => "MEMBER_EXISTS",
        BookingError::ClassNotFound { .. } => "CLASS_NOT_FOUND",
        BookingError::MemberNotFound(_) => "MEMBER_NOT_FOUND",
        BookingError::AlreadyBooked { .. } => "ALREADY_BOOKED",
    }
}

/// Validation → 400, Conflict → 409, `NotFound` → 404.
impl From<BookingError> for AppError {
    fn from(error: BookingError) -> Self {
        let status = match error.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
        };
        Self::new(status, error.to_string(), booking_error_code(&error))
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::ShutdownInProgress => Self::unavailable(error.to_string()),
        }
    }
}
