use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::FieldError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

pub async fn register<R: UserRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponseData>), ApiError> {
    let command = body.try_into_command()?;

    let user = state
        .service
        .register(command)
        .await
        .map_err(|e| ApiError::from_user_error(e, state.expose_error_details))?;

    // No token on registration; the caller logs in separately.
    Ok((StatusCode::CREATED, Json((&user).into())))
}

/// HTTP request body for registration (raw JSON).
///
/// All fields optional at the parsing layer so presence failures surface as
/// field-level validation errors rather than a deserialization rejection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
}

impl RegisterRequest {
    /// Validate shape and presence, collecting every field failure.
    fn try_into_command(self) -> Result<CreateUserCommand, ApiError> {
        let mut errors = Vec::new();

        let username = match self.username {
            Some(raw) => Username::new(raw)
                .map_err(|e| errors.push(FieldError::new("username", e)))
                .ok(),
            None => {
                errors.push(FieldError::new("username", "Username is required"));
                None
            }
        };

        let email = match self.email {
            Some(raw) => EmailAddress::new(raw)
                .map_err(|e| errors.push(FieldError::new("email", e)))
                .ok(),
            None => {
                errors.push(FieldError::new("email", "Email is required"));
                None
            }
        };

        let password = match self.password {
            Some(raw) => {
                match self.confirm_password {
                    None => errors.push(FieldError::new(
                        "confirmPassword",
                        "Password confirmation is required",
                    )),
                    Some(ref confirm) if *confirm != raw => {
                        errors.push(FieldError::new("confirmPassword", "Passwords do not match"))
                    }
                    _ => {}
                }
                Password::new(raw)
                    .map_err(|e| errors.push(FieldError::new("password", e)))
                    .ok()
            }
            None => {
                errors.push(FieldError::new("password", "Password is required"));
                if self.confirm_password.is_none() {
                    errors.push(FieldError::new(
                        "confirmPassword",
                        "Password confirmation is required",
                    ));
                }
                None
            }
        };

        match (username, email, password) {
            (Some(username), Some(email), Some(password)) if errors.is_empty() => {
                Ok(CreateUserCommand::new(username, email, password))
            }
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// Public fields of the created user; never the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<&User> for RegisterResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}
