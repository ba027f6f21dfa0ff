use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::user::models::LoginIdentifier;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub login: LoginConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Captured from RUN_MODE at load time, not from the config sources.
    #[serde(skip)]
    pub run_mode: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Signing secret. Loaded once at startup; never logged.
    pub secret: String,
    pub expiration_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoginConfig {
    /// Which field identifies the account at login: username or email.
    pub identifier: LoginIdentifier,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            identifier: LoginIdentifier::Username,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    /// Seconds to replenish one request of quota.
    pub replenish_seconds: u64,
    /// Maximum burst of requests per client IP.
    pub burst: u32,
}

impl Default for RateLimitConfig {
    // 100 requests per hour per IP
    fn default() -> Self {
        Self {
            replenish_seconds: 36,
            burst: 100,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let mut config: Config = configuration.try_deserialize()?;
        config.run_mode = run_mode;

        Ok(config)
    }

    /// Whether error responses may carry internal detail.
    ///
    /// Suppressed in production so store- and hash-layer faults stay opaque
    /// to clients.
    pub fn expose_error_details(&self) -> bool {
        self.run_mode != "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_defaults_to_hundred_per_hour() {
        let rate_limit = RateLimitConfig::default();
        assert_eq!(rate_limit.replenish_seconds * u64::from(rate_limit.burst), 3600);
    }

    #[test]
    fn test_login_defaults_to_username() {
        let login = LoginConfig::default();
        assert_eq!(login.identifier, LoginIdentifier::Username);
    }
}
