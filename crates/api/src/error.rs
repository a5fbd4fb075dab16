use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rolegate_core::error::{CoreError, RoleError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`RoleError`] for domain errors and adds
/// [`AppError::BadRequest`] for input axum could not extract. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An authentication or authorization failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A rejected role operation.
    #[error(transparent)]
    Role(#[from] RoleError),

    /// A malformed body or query string.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Role(role) => classify_role_error(role),
            AppError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "Malformed request");
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
    }
}

/// Every role rejection is a 400 except a store failure, which is a 500 with
/// a sanitized message.
fn classify_role_error(err: &RoleError) -> (StatusCode, &'static str, String) {
    let code = match err {
        RoleError::Invalid(_) => "INVALID_ROLE",
        RoleError::UnknownMembers(_) => "UNKNOWN_MEMBER",
        RoleError::RoleNotFound(_) => "ROLE_NOT_FOUND",
        RoleError::NameTaken(_) => "ROLE_NAME_TAKEN",
        RoleError::Rejected(_) => "ROLE_REJECTED",
        RoleError::Store(msg) => {
            tracing::error!(error = %msg, "Role store failure");
            return internal();
        }
    };
    (StatusCode::BAD_REQUEST, code, err.to_string())
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
