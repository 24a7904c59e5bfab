use std::sync::Arc;

use anyhow::anyhow;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use crates::domain::repositories::users::UserRepository;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::auth;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("wrong credentials entered")]
    InvalidCredentials,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SessionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SessionError::InvalidCredentials => StatusCode::FORBIDDEN,
            SessionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct SessionUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    jwt_secret: String,
    token_ttl_seconds: u64,
}

impl<U> SessionUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repository: Arc<U>, jwt_secret: String, token_ttl_seconds: u64) -> Self {
        Self {
            user_repository,
            jwt_secret,
            token_ttl_seconds,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, SessionError> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "sessions: failed to load user by email");
                SessionError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = SessionError::InvalidCredentials;
                warn!(
                    status = err.status_code().as_u16(),
                    "sessions: unknown email on login"
                );
                err
            })?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|err| SessionError::Internal(anyhow!("stored password hash invalid: {err}")))?;

        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_err()
        {
            let err = SessionError::InvalidCredentials;
            warn!(
                user_id = %user.id,
                status = err.status_code().as_u16(),
                "sessions: password mismatch on login"
            );
            return Err(err);
        }

        let token =
            auth::issue_session_jwt(&self.jwt_secret, self.token_ttl_seconds, user.id, &user.email)
                .map_err(SessionError::Internal)?;

        info!(user_id = %user.id, "sessions: login succeeded");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::PasswordHasher;
    use argon2::password_hash::{SaltString, rand_core::OsRng};
    use chrono::Utc;
    use crates::domain::{entities::users::UserEntity, repositories::users::MockUserRepository};
    use uuid::Uuid;

    const SECRET: &str = "supersecretjwtsecretforunittesting123";

    fn hashed(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    fn sample_user(password: &str) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            email: "buyer@example.com".to_string(),
            password_hash: hashed(password),
            active_plan: false,
            purchased_duration_days: None,
            plan_expires_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn login_returns_a_token_for_valid_credentials() {
        let user = sample_user("hunter2hunter2");
        let user_id = user.id;

        let mut user_repository = MockUserRepository::new();
        user_repository.expect_find_by_email().returning(move |_| {
            let user = user.clone();
            Box::pin(async move { Ok(Some(user)) })
        });

        let usecase = SessionUseCase::new(Arc::new(user_repository), SECRET.to_string(), 3600);
        let token = usecase
            .login("buyer@example.com", "hunter2hunter2")
            .await
            .expect("login should succeed");

        let decoded = jsonwebtoken::decode::<crate::auth::SessionClaims>(
            &token,
            &jsonwebtoken::DecodingKey::from_secret(SECRET.as_bytes()),
            &jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256),
        )
        .expect("token should decode");
        assert_eq!(decoded.claims.sub, user_id.to_string());
    }

    #[tokio::test]
    async fn login_rejects_a_wrong_password() {
        let user = sample_user("hunter2hunter2");

        let mut user_repository = MockUserRepository::new();
        user_repository.expect_find_by_email().returning(move |_| {
            let user = user.clone();
            Box::pin(async move { Ok(Some(user)) })
        });

        let usecase = SessionUseCase::new(Arc::new(user_repository), SECRET.to_string(), 3600);
        let result = usecase.login("buyer@example.com", "wrong-password").await;

        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn login_rejects_an_unknown_email() {
        let mut user_repository = MockUserRepository::new();
        user_repository
            .expect_find_by_email()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = SessionUseCase::new(Arc::new(user_repository), SECRET.to_string(), 3600);
        let result = usecase.login("nobody@example.com", "whatever").await;

        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }
}
