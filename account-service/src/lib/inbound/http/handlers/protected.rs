use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use crate::inbound::http::middleware::AuthenticatedUser;

/// Example protected operation: echoes the identity the token gate resolved.
pub async fn protected(
    Extension(user): Extension<AuthenticatedUser>,
) -> (StatusCode, Json<ProtectedResponseData>) {
    (
        StatusCode::OK,
        Json(ProtectedResponseData {
            message: "This is a protected route".to_string(),
            user: ProtectedUserData {
                id: user.user_id.to_string(),
                username: user.username,
            },
        }),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectedResponseData {
    pub message: String,
    pub user: ProtectedUserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectedUserData {
    pub id: String,
    pub username: String,
}
