//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES, DEFAULT_DATABASE_URL,
    DEFAULT_REFRESH_TOKEN_EXPIRE_MINUTES, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    jwt_refresh_secret: String,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_minutes: i64,
    /// When false, login accepts any password for a known username.
    pub password_verification: bool,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_refresh_secret", &"[REDACTED]")
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("refresh_token_expire_minutes", &self.refresh_token_expire_minutes)
            .field("password_verification", &self.password_verification)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if a JWT secret is missing in a release build or is too short.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = secret_from_env("JWT_SECRET", "dev-access-secret-minimum-32-chars!");
        let jwt_refresh_secret =
            secret_from_env("JWT_REFRESH_SECRET", "dev-refresh-secret-minimum-32-chars");

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_refresh_secret,
            access_token_expire_minutes: parse_env("ACCESS_TOKEN_EXPIRE_MINUTES")
                .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES),
            refresh_token_expire_minutes: parse_env("REFRESH_TOKEN_EXPIRE_MINUTES")
                .unwrap_or(DEFAULT_REFRESH_TOKEN_EXPIRE_MINUTES),
            password_verification: parse_env("PASSWORD_VERIFICATION").unwrap_or(true),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_env("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Build a configuration with explicit secrets and defaults for everything else.
    pub fn with_secrets(jwt_secret: impl Into<String>, jwt_refresh_secret: impl Into<String>) -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: jwt_secret.into(),
            jwt_refresh_secret: jwt_refresh_secret.into(),
            access_token_expire_minutes: DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
            refresh_token_expire_minutes: DEFAULT_REFRESH_TOKEN_EXPIRE_MINUTES,
            password_verification: true,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }

    /// Secret used to sign and verify access tokens.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Secret used to sign refresh tokens.
    pub fn jwt_refresh_secret_bytes(&self) -> &[u8] {
        self.jwt_refresh_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn secret_from_env(key: &str, dev_default: &str) -> String {
    let secret = env::var(key).unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            tracing::warn!("{} not set, using insecure default for development", key);
            dev_default.to_string()
        } else {
            panic!("{} environment variable must be set in production", key);
        }
    });

    if secret.len() < MIN_JWT_SECRET_LENGTH {
        panic!("{} must be at least {} characters long", key, MIN_JWT_SECRET_LENGTH);
    }

    secret
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
