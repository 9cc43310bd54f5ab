//! Authentication service - login, token issuance and bearer resolution.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, MSG_USERNAME_NOT_FOUND, TOKEN_TYPE_BEARER};
use crate::domain::{PasswordVerifier, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// JWT claims payload. `sub` is the username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Tokens returned after a successful login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue an access/refresh token pair
    async fn login(&self, username: &str, password: &str) -> AppResult<TokenPair>;

    /// Verify an access token and extract its claims
    fn verify_access_token(&self, token: &str) -> AppResult<Claims>;

    /// Resolve a bearer access token to the user it was issued for
    async fn current_user(&self, token: &str) -> AppResult<User>;
}

fn sign(username: &str, ttl_minutes: i64, secret: &[u8]) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: username.to_string(),
        exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
        iat: now.timestamp(),
    };

    Ok(encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))?)
}

/// Sign an access token for `username`.
pub fn create_access_token(username: &str, config: &Config) -> AppResult<String> {
    sign(username, config.access_token_expire_minutes, config.jwt_secret_bytes())
}

/// Sign a refresh token for `username` with the separate refresh secret.
pub fn create_refresh_token(username: &str, config: &Config) -> AppResult<String> {
    sign(
        username,
        config.refresh_token_expire_minutes,
        config.jwt_refresh_secret_bytes(),
    )
}

fn decode_with(token: &str, secret: &[u8]) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    verifier: Arc<dyn PasswordVerifier>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, verifier: Arc<dyn PasswordVerifier>, config: Config) -> Self {
        Self {
            uow,
            verifier,
            config,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, username: &str, password: &str) -> AppResult<TokenPair> {
        let user = self
            .uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or_not_found(MSG_USERNAME_NOT_FOUND)?;

        if !self.verifier.verify(password, &user.password_hash) {
            tracing::debug!(username, "Password verification failed");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "Issued tokens");

        Ok(TokenPair {
            access_token: create_access_token(&user.username, &self.config)?,
            refresh_token: create_refresh_token(&user.username, &self.config)?,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        })
    }

    fn verify_access_token(&self, token: &str) -> AppResult<Claims> {
        decode_with(token, self.config.jwt_secret_bytes())
    }

    async fn current_user(&self, token: &str) -> AppResult<User> {
        let claims = self.verify_access_token(token)?;

        self.uow
            .users()
            .find_by_username(&claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AcceptAnyPassword, Argon2Verifier, Password};
    use crate::services::test_support::TestUnitOfWork;
    use crate::infra::MockUserRepository;

    fn config() -> Config {
        Config::with_secrets(
            "test-access-secret-for-testing-only!!",
            "test-refresh-secret-for-testing-only!",
        )
    }

    fn stored_user(password: &str) -> User {
        User {
            id: 1,
            name: "Ann".to_string(),
            username: "ann".to_string(),
            email: "ann@example.com".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            user_type_id: None,
        }
    }

    fn authenticator(
        users: MockUserRepository,
        verifier: Arc<dyn PasswordVerifier>,
    ) -> Authenticator<TestUnitOfWork> {
        let uow = TestUnitOfWork::builder().users(users).build();
        Authenticator::new(Arc::new(uow), verifier, config())
    }

    #[tokio::test]
    async fn test_login_unknown_username_is_rejected() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .withf(|username| username == "ghost")
            .returning(|_| Ok(None));

        let auth = authenticator(users, Arc::new(Argon2Verifier));
        let err = auth.login("ghost", "whatever1").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref m) if m == MSG_USERNAME_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_rejected() {
        let user = stored_user("CorrectHorse1");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator(users, Arc::new(Argon2Verifier));
        let err = auth.login("ann", "BatteryStaple1").await.unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_issues_tokens_for_username() {
        let user = stored_user("CorrectHorse1");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator(users, Arc::new(Argon2Verifier));
        let tokens = auth.login("ann", "CorrectHorse1").await.unwrap();

        assert_eq!(tokens.token_type, "bearer");
        assert_ne!(tokens.access_token, tokens.refresh_token);

        let claims = auth.verify_access_token(&tokens.access_token).unwrap();
        assert_eq!(claims.sub, "ann");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn test_bypass_verifier_accepts_any_password() {
        let user = stored_user("CorrectHorse1");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator(users, Arc::new(AcceptAnyPassword));
        assert!(auth.login("ann", "anything").await.is_ok());
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let cfg = config();
        let refresh = create_refresh_token("ann", &cfg).unwrap();

        let auth = authenticator(MockUserRepository::new(), Arc::new(Argon2Verifier));
        assert!(matches!(
            auth.verify_access_token(&refresh),
            Err(AppError::Jwt(_))
        ));
    }

    #[tokio::test]
    async fn test_current_user_resolves_token() {
        let user = stored_user("CorrectHorse1");
        let expected = user.clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .withf(|username| username == "ann")
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator(users, Arc::new(Argon2Verifier));
        let token = create_access_token("ann", &config()).unwrap();

        assert_eq!(auth.current_user(&token).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_current_user_for_deleted_username_is_unauthorized() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));

        let auth = authenticator(users, Arc::new(Argon2Verifier));
        let token = create_access_token("gone", &config()).unwrap();

        assert!(matches!(
            auth.current_user(&token).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_current_user_rejects_garbage_token() {
        let auth = authenticator(MockUserRepository::new(), Arc::new(Argon2Verifier));
        assert!(matches!(
            auth.current_user("not.a.jwt").await,
            Err(AppError::Jwt(_))
        ));
    }
}
