use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Identity attached to the request once the bearer token is accepted.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Token gate for protected routes.
///
/// Runs before any handler that assumes an authenticated identity:
/// no usable token → 401; present but invalid or expired → 403.
pub async fn require_auth<R: UserRepository>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let user = state.service.authorize(token).await.map_err(|e| {
        tracing::warn!("Token rejected: {}", e);
        ApiError::from_token_error(e, state.expose_error_details).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username.as_str().to_string(),
    });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::MissingToken.into_response())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::MissingToken.into_response())?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::MissingToken.into_response())?;

    if token.is_empty() {
        return Err(ApiError::MissingToken.into_response());
    }

    Ok(token)
}
