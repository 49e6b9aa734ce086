use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::creation::CreationError;
use common::host_approval::HostApprovalError;
use common::lifecycle::LifecycleError;
use common::team::FieldViolation;
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `TOKEN_MISSING`,
    /// `TOKEN_INVALID`, `INVALID_CREDENTIALS`, `PERMISSION_DENIED`, `NOT_FOUND`,
    /// `CONFLICT`, `USERNAME_TAKEN`, `INVALID_TRANSITION`, `INCOMPLETE_HACKATHON`,
    /// `INCOMPLETE_DRAFT`, `INELIGIBLE_WINDOW`, `TEAM_COMPOSITION`,
    /// `HOST_NOT_APPROVED`, `ALREADY_DECIDED`, `ALREADY_REGISTERED`,
    /// `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Title must be 1-256 characters")]
    pub message: String,
    /// Field-level problems, present for `TEAM_COMPOSITION` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<FieldViolation>>,
}

impl ErrorBody {
    fn new(code: &'static str, message: String) -> Self {
        Self {
            code,
            message,
            violations: None,
        }
    }
}

/// Application-level error type.
///
/// Every variant is locally recoverable by the caller; only `Internal`
/// indicates something the user cannot fix by changing the request.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    TokenMissing,
    TokenInvalid,
    InvalidCredentials,
    PermissionDenied,
    NotFound(String),
    Conflict(String),
    UsernameTaken,
    /// Lifecycle edge not permitted.
    InvalidTransition {
        from: common::HackathonStatus,
        to: common::HackathonStatus,
    },
    /// Mandatory content missing before a status change.
    IncompleteHackathon {
        missing: Vec<&'static str>,
    },
    /// Required draft fields missing before creation.
    IncompleteDraft {
        missing: Vec<&'static str>,
    },
    /// Action requested outside its permitted time window.
    IneligibleWindow(String),
    /// One or more field-level team/registration problems.
    TeamComposition(Vec<FieldViolation>),
    /// Creation attempted before host approval.
    HostNotApproved,
    AlreadyDecided,
    AlreadyRegistered,
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("VALIDATION_ERROR", msg),
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("TOKEN_MISSING", "Authentication required".into()),
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("TOKEN_INVALID", "Invalid or expired token".into()),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("INVALID_CREDENTIALS", "Invalid username or password".into()),
            ),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                ErrorBody::new("PERMISSION_DENIED", "Insufficient permissions".into()),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new("NOT_FOUND", msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::new("CONFLICT", msg)),
            AppError::UsernameTaken => (
                StatusCode::CONFLICT,
                ErrorBody::new("USERNAME_TAKEN", "Username is already taken".into()),
            ),
            AppError::InvalidTransition { from, to } => (
                StatusCode::CONFLICT,
                ErrorBody::new(
                    "INVALID_TRANSITION",
                    format!("Cannot transition hackathon from {from} to {to}"),
                ),
            ),
            AppError::IncompleteHackathon { missing } => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(
                    "INCOMPLETE_HACKATHON",
                    format!("Missing required content: {}", missing.join(", ")),
                ),
            ),
            AppError::IncompleteDraft { missing } => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(
                    "INCOMPLETE_DRAFT",
                    format!("Missing required fields: {}", missing.join(", ")),
                ),
            ),
            AppError::IneligibleWindow(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("INELIGIBLE_WINDOW", msg),
            ),
            AppError::TeamComposition(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    code: "TEAM_COMPOSITION",
                    message: "Registration has field-level problems".into(),
                    violations: Some(violations),
                },
            ),
            AppError::HostNotApproved => (
                StatusCode::FORBIDDEN,
                ErrorBody::new(
                    "HOST_NOT_APPROVED",
                    "Host account has not been approved".into(),
                ),
            ),
            AppError::AlreadyDecided => (
                StatusCode::CONFLICT,
                ErrorBody::new(
                    "ALREADY_DECIDED",
                    "This host request has already been decided".into(),
                ),
            ),
            AppError::AlreadyRegistered => (
                StatusCode::CONFLICT,
                ErrorBody::new(
                    "ALREADY_REGISTERED",
                    "Already registered for this hackathon".into(),
                ),
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("INTERNAL_ERROR", "An unexpected error occurred".into()),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::Forbidden => AppError::PermissionDenied,
            LifecycleError::InvalidTransition { from, to } => {
                AppError::InvalidTransition { from, to }
            }
            LifecycleError::IncompleteHackathon { missing } => {
                AppError::IncompleteHackathon { missing }
            }
        }
    }
}

impl From<CreationError> for AppError {
    fn from(err: CreationError) -> Self {
        match err {
            CreationError::HostNotApproved => AppError::HostNotApproved,
            CreationError::IncompleteDraft { missing } => AppError::IncompleteDraft { missing },
            CreationError::InvalidReceipt => {
                AppError::Validation("Payment receipt identifiers must not be blank".into())
            }
        }
    }
}

impl From<HostApprovalError> for AppError {
    fn from(err: HostApprovalError) -> Self {
        match err {
            HostApprovalError::Forbidden => AppError::PermissionDenied,
            HostApprovalError::AlreadyDecided => AppError::AlreadyDecided,
        }
    }
}
