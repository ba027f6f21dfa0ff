use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::FieldError;
use crate::domain::user::models::AuthenticateUserCommand;
use crate::domain::user::models::LoginIdentifier;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

pub async fn login<R: UserRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponseData>), ApiError> {
    let command = body.try_into_command(state.login_identifier)?;

    let outcome = state
        .service
        .login(command)
        .await
        .map_err(|e| ApiError::from_user_error(e, state.expose_error_details))?;

    Ok((
        StatusCode::OK,
        Json(LoginResponseData {
            token: outcome.access_token,
        }),
    ))
}

/// HTTP request body for login (raw JSON).
///
/// Carries both identifier fields; which one is consulted is decided by the
/// configured login identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl LoginRequest {
    fn try_into_command(
        self,
        identifier: LoginIdentifier,
    ) -> Result<AuthenticateUserCommand, ApiError> {
        let mut errors = Vec::new();

        let identifier_value = match identifier {
            LoginIdentifier::Username => match self.username {
                Some(value) => Some(value),
                None => {
                    errors.push(FieldError::new("username", "Username is required"));
                    None
                }
            },
            LoginIdentifier::Email => match self.email {
                Some(value) => Some(value),
                None => {
                    errors.push(FieldError::new("email", "Email is required"));
                    None
                }
            },
        };

        let password = match self.password {
            Some(value) => Some(value),
            None => {
                errors.push(FieldError::new("password", "Password is required"));
                None
            }
        };

        match (identifier_value, password) {
            (Some(identifier), Some(password)) => Ok(AuthenticateUserCommand {
                identifier,
                password,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
