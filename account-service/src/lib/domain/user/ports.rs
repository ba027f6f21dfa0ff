use async_trait::async_trait;

use crate::domain::user::models::AuthenticateUserCommand;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::TokenVerifyError;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for the authentication workflow.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with validated credentials.
    ///
    /// Checks uniqueness, hashes the password off the async threads, and
    /// persists the record. No token is issued on registration.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `DuplicateUser` - Username or email is already taken
    /// * `HashingFailed` - Password hashing failed
    /// * `PersistenceFailed` - Store operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Authenticate a user and issue an access token.
    ///
    /// An unknown identifier and a wrong password both produce
    /// `InvalidCredentials` so callers cannot enumerate accounts.
    ///
    /// # Arguments
    /// * `command` - Identifier (per configured login field) and password
    ///
    /// # Returns
    /// The user and a freshly issued access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or wrong password
    /// * `TokenIssuance` - Token generation failed
    /// * `PersistenceFailed` - Store operation failed
    async fn login(&self, command: AuthenticateUserCommand) -> Result<LoginOutcome, UserError>;

    /// Validate an access token and resolve its subject.
    ///
    /// Verifies signature and expiry, loads the subject, and rejects tokens
    /// issued before the account's last password change.
    ///
    /// # Arguments
    /// * `token` - Bearer token from the Authorization header
    ///
    /// # Returns
    /// The authenticated user
    ///
    /// # Errors
    /// * `Expired` - Token is past its expiry
    /// * `Invalid` - Bad signature, malformed claims, unknown subject, or
    ///   password changed after issuance
    /// * `Lookup` - Store operation failed
    async fn authorize(&self, token: &str) -> Result<User, TokenVerifyError>;
}

/// Persistence operations for the user aggregate (the credential store).
///
/// All operations are suspending I/O calls. The store's own uniqueness
/// enforcement is the final arbiter for concurrent registrations.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `DuplicateUser` - Username or email is already taken
    /// * `PersistenceFailed` - Store operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `PersistenceFailed` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// # Errors
    /// * `PersistenceFailed` - Store operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by normalized email address.
    ///
    /// # Errors
    /// * `PersistenceFailed` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}
