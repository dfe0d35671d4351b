use aula_auth::password::verify_password;
use aula_auth::token::{issue_token, validate_token};

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> LoginUseCase<R> {
    /// Unknown email and wrong password both yield the same error, so the
    /// response never reveals whether an account exists.
    pub async fn execute(&self, input: LoginInput) -> Result<(User, String), ApiError> {
        let user = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(ApiError::InvalidCredentials);
        }

        let token = issue_token(user.id, user.role.as_u8(), &self.jwt_secret)
            .map_err(|e| ApiError::Unexpected(anyhow::Error::new(e)))?;

        Ok((user, token))
    }
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

pub struct RefreshTokenUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> RefreshTokenUseCase<R> {
    /// Stateless refresh: validate the old token, re-read the current user,
    /// issue a fresh token. The old token stays valid until it expires.
    pub async fn execute(&self, old_token: &str) -> Result<(User, String), ApiError> {
        let info =
            validate_token(old_token, &self.jwt_secret).map_err(|_| ApiError::InvalidToken)?;

        let user = self
            .repo
            .find_by_id(info.user_id)
            .await?
            .ok_or(ApiError::NotFound("user"))?;

        let token = issue_token(user.id, user.role.as_u8(), &self.jwt_secret)
            .map_err(|e| ApiError::Unexpected(anyhow::Error::new(e)))?;

        Ok((user, token))
    }
}
