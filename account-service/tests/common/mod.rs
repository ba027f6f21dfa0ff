use std::sync::Arc;

use account_service::domain::user::models::LoginIdentifier;
use account_service::domain::user::service::AuthService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use auth::Authenticator;
use chrono::Duration;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns the real router on a random port.
///
/// Backed by the in-memory credential store, so no external services are
/// needed; the HTTP surface is otherwise identical to production.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn with the default configuration: login by username, 24h tokens.
    pub async fn spawn() -> Self {
        Self::spawn_with(LoginIdentifier::Username).await
    }

    /// Spawn with an explicit login identifier.
    pub async fn spawn_with(login_identifier: LoginIdentifier) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET, Duration::hours(24)));
        let repository = Arc::new(InMemoryUserRepository::new());
        let service = Arc::new(AuthService::new(
            repository,
            Arc::clone(&authenticator),
            login_identifier,
        ));

        // Production-equivalent mode: no internal detail in error bodies.
        let router = create_router(service, login_identifier, false);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Issue a token that expired in the past, signed with the app's secret.
    pub fn issue_expired_token(&self, user_id: &str, username: &str) -> String {
        let expired_issuer = Authenticator::new(TEST_JWT_SECRET, Duration::minutes(-2));
        expired_issuer
            .issue_token(user_id, username)
            .expect("Failed to issue expired token")
    }
}
