use std::sync::Mutex;
use std::sync::PoisonError;

use async_trait::async_trait;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// In-memory credential store.
///
/// Enforces the same username/email uniqueness as the Postgres schema, but
/// atomically under a single mutex, which makes it a valid arbiter for
/// concurrent registrations. Backs the integration-test harness and local
/// runs without a database.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> UserError {
    UserError::PersistenceFailed("user store mutex poisoned".to_string())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().map_err(poisoned)?;

        if users.iter().any(|u| u.username == user.username) {
            return Err(UserError::DuplicateUser("username".to_string()));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateUser("email".to_string()));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.username == *username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }
}
