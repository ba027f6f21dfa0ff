use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtError;
use chrono::Utc;

use crate::domain::user::models::AuthenticateUserCommand;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginIdentifier;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::TokenVerifyError;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// The authentication workflow.
///
/// Orchestrates the credential store, the password hasher, and the token
/// issuer/verifier. Holds no mutable state; shared via `Arc` across
/// requests.
pub struct AuthService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    authenticator: Arc<Authenticator>,
    login_identifier: LoginIdentifier,
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hashing and token primitives
    /// * `login_identifier` - Which field identifies accounts at login
    pub fn new(
        repository: Arc<R>,
        authenticator: Arc<Authenticator>,
        login_identifier: LoginIdentifier,
    ) -> Self {
        Self {
            repository,
            authenticator,
            login_identifier,
        }
    }

    /// Hash on a blocking worker thread. Argon2 is CPU-bound and must not
    /// stall the async executor under concurrent requests.
    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(|e| UserError::HashingFailed(e.to_string()))
    }

    /// Verify on a blocking worker thread, for the same reason as hashing.
    async fn verify_password(&self, password: String, stored_hash: String) -> Result<bool, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &stored_hash))
            .await
            .map_err(|e| UserError::Unknown(format!("Verification task failed: {}", e)))
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: UserRepository,
{
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let CreateUserCommand {
            username,
            email,
            password,
        } = command;

        // Uniqueness pre-check. Not atomic with the insert: two concurrent
        // registrations can both pass it, so the store's unique constraints
        // remain the final arbiter and surface as DuplicateUser below.
        if self
            .repository
            .find_by_username(&username)
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateUser("username".to_string()));
        }
        if self
            .repository
            .find_by_email(email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateUser("email".to_string()));
        }

        let password_hash = self.hash_password(password.into_inner()).await?;

        let user = User {
            id: UserId::new(),
            username,
            email,
            password_hash,
            password_changed_at: None,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, command: AuthenticateUserCommand) -> Result<LoginOutcome, UserError> {
        let user = match self.login_identifier {
            LoginIdentifier::Username => {
                // An identifier that fails username validation cannot match
                // any stored account; collapse it into the generic error.
                let username = Username::new(command.identifier)
                    .map_err(|_| UserError::InvalidCredentials)?;
                self.repository.find_by_username(&username).await?
            }
            LoginIdentifier::Email => {
                let email = command.identifier.trim().to_lowercase();
                self.repository.find_by_email(&email).await?
            }
        };

        // Unknown account and wrong password take the same exit so the
        // response cannot be used to enumerate accounts.
        let Some(user) = user else {
            return Err(UserError::InvalidCredentials);
        };

        let password_matches = self
            .verify_password(command.password, user.password_hash.clone())
            .await?;

        if !password_matches {
            return Err(UserError::InvalidCredentials);
        }

        let access_token = self
            .authenticator
            .issue_token(&user.id.to_string(), user.username.as_str())
            .map_err(|e| UserError::TokenIssuance(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User authenticated");

        Ok(LoginOutcome { user, access_token })
    }

    async fn authorize(&self, token: &str) -> Result<User, TokenVerifyError> {
        let claims = self.authenticator.verify_token(token).map_err(|e| match e {
            JwtError::TokenExpired => TokenVerifyError::Expired,
            other => TokenVerifyError::Invalid(other.to_string()),
        })?;

        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| TokenVerifyError::Invalid(e.to_string()))?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await
            .map_err(|e| TokenVerifyError::Lookup(e.to_string()))?
            .ok_or_else(|| TokenVerifyError::Invalid("subject no longer exists".to_string()))?;

        let issued_at = claims
            .issued_at()
            .ok_or_else(|| TokenVerifyError::Invalid("issued-at out of range".to_string()))?;

        if user.password_changed_since(issued_at) {
            return Err(TokenVerifyError::Invalid(
                "password changed after token issuance".to_string(),
            ));
        }

        Ok(user)
    }
}
