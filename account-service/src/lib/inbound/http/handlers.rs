use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::user::errors::TokenVerifyError;
use crate::user::errors::UserError;

pub mod login;
pub mod protected;
pub mod register;

/// One field-level validation failure, as surfaced to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl ToString) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// HTTP-level error taxonomy.
///
/// Every variant maps to the uniform `{error: {message, details?}}` envelope
/// except `Validation`, which carries field-level messages as
/// `{errors: [...]}`. Internal detail is decided at construction time so
/// production responses stay opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400 with field-level messages
    Validation(Vec<FieldError>),
    /// 400, username or email already taken
    Duplicate,
    /// 401, deliberately generic
    InvalidCredentials,
    /// 401, no usable bearer token on a protected route
    MissingToken,
    /// 403, bad signature, malformed, expired, or revoked by password change
    TokenRejected,
    /// 404 fallback for unmatched routes
    RouteNotFound,
    /// 500, store- or crypto-layer fault
    Internal { detail: Option<String> },
}

impl ApiError {
    /// Map a workflow error, deciding whether internal detail is exposed.
    pub fn from_user_error(err: UserError, expose_details: bool) -> Self {
        match err {
            UserError::DuplicateUser(_) => ApiError::Duplicate,
            UserError::InvalidCredentials => ApiError::InvalidCredentials,
            UserError::InvalidUsername(e) => {
                ApiError::Validation(vec![FieldError::new("username", e)])
            }
            UserError::InvalidEmail(e) => ApiError::Validation(vec![FieldError::new("email", e)]),
            UserError::InvalidPassword(e) => {
                ApiError::Validation(vec![FieldError::new("password", e)])
            }
            other => ApiError::Internal {
                detail: expose_details.then(|| other.to_string()),
            },
        }
    }

    /// Map a token-gate error for protected routes.
    pub fn from_token_error(err: TokenVerifyError, expose_details: bool) -> Self {
        match err {
            TokenVerifyError::Expired | TokenVerifyError::Invalid(_) => ApiError::TokenRejected,
            TokenVerifyError::Lookup(detail) => ApiError::Internal {
                detail: expose_details.then_some(detail),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::warn!(
                    status = StatusCode::BAD_REQUEST.as_u16(),
                    count = errors.len(),
                    "Validation failed"
                );
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::Duplicate => error_body(StatusCode::BAD_REQUEST, "User already exists", None),
            ApiError::InvalidCredentials => {
                error_body(StatusCode::UNAUTHORIZED, "Invalid credentials", None)
            }
            ApiError::MissingToken => {
                error_body(StatusCode::UNAUTHORIZED, "Access token required", None)
            }
            ApiError::TokenRejected => {
                error_body(StatusCode::FORBIDDEN, "Invalid or expired token", None)
            }
            ApiError::RouteNotFound => error_body(StatusCode::NOT_FOUND, "Route not found", None),
            ApiError::Internal { detail } => {
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", detail)
            }
        }
    }
}

/// Build the uniform error envelope and log the outcome. Runs inside the
/// request trace span, so method and path are attached by the tracer.
fn error_body(status: StatusCode, message: &str, details: Option<String>) -> Response {
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), message, details = ?details, "Request failed");
    } else {
        tracing::warn!(status = status.as_u16(), message, "Request rejected");
    }

    let mut body = json!({ "error": { "message": message } });
    if let Some(details) = details {
        body["error"]["details"] = json!(details);
    }

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::errors::UsernameError;

    #[test]
    fn test_internal_detail_suppressed_when_not_exposed() {
        let err = ApiError::from_user_error(
            UserError::PersistenceFailed("connection refused".to_string()),
            false,
        );
        assert_eq!(err, ApiError::Internal { detail: None });
    }

    #[test]
    fn test_internal_detail_carried_when_exposed() {
        let err = ApiError::from_user_error(
            UserError::PersistenceFailed("connection refused".to_string()),
            true,
        );
        assert!(matches!(err, ApiError::Internal { detail: Some(d) } if d.contains("connection refused")));
    }

    #[test]
    fn test_expired_and_invalid_tokens_map_to_the_same_rejection() {
        let expired = ApiError::from_token_error(TokenVerifyError::Expired, false);
        let invalid = ApiError::from_token_error(
            TokenVerifyError::Invalid("bad signature".to_string()),
            false,
        );
        assert_eq!(expired, invalid);
    }

    #[test]
    fn test_validation_maps_field_errors() {
        let err = ApiError::from_user_error(
            UserError::InvalidUsername(UsernameError::InvalidCharacters),
            false,
        );
        let ApiError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "username");
    }
}
