//! Authentication primitives library
//!
//! Provides the building blocks for username/password authentication:
//! - Password hashing and verification (Argon2id)
//! - JWT access-token issuance and verification (HS256)
//! - An authenticator facade coordinating both
//!
//! The service layer defines its own workflow on top of these primitives;
//! this crate holds no user model and performs no I/O.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::AccessClaims;
//! use auth::TokenIssuer;
//! use auth::TokenVerifier;
//! use chrono::Duration;
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let issuer = TokenIssuer::new(secret);
//! let verifier = TokenVerifier::new(secret);
//!
//! let claims = AccessClaims::new("user123", "alice", Duration::hours(1));
//! let token = issuer.issue(&claims).unwrap();
//! let decoded = verifier.verify(&token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "user123", "alice").unwrap();
//!
//! // Gate: validate token
//! let claims = auth.verify_token(&result.access_token).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use password::PasswordError;
pub use password::PasswordHasher;
