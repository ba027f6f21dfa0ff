use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::protected::protected;
use super::handlers::register::register;
use super::handlers::ApiError;
use super::middleware::require_auth;
use crate::domain::user::models::LoginIdentifier;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::AuthService;

/// Request body ceiling; registration and login payloads are tiny.
const MAX_BODY_BYTES: usize = 50 * 1024;

pub struct AppState<R: UserRepository> {
    pub service: Arc<AuthService<R>>,
    pub login_identifier: LoginIdentifier,
    pub expose_error_details: bool,
}

impl<R: UserRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            login_identifier: self.login_identifier,
            expose_error_details: self.expose_error_details,
        }
    }
}

pub fn create_router<R: UserRepository>(
    service: Arc<AuthService<R>>,
    login_identifier: LoginIdentifier,
    expose_error_details: bool,
) -> Router {
    let state = AppState {
        service,
        login_identifier,
        expose_error_details,
    };

    let public_routes = Router::new()
        .route("/register", post(register::<R>))
        .route("/login", post(login::<R>));

    let protected_routes = Router::new()
        .route("/protected", get(protected))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<R>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(route_not_found)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
