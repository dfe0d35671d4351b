use chrono::Utc;
use uuid::Uuid;

use aula_auth::password::hash_password;
use aula_domain::role::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserUpdate};
use crate::error::ApiError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub email: String,
    pub name: String,
    pub password: String,
    pub avatar: Option<String>,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    /// The email pre-check gives the fast 409; the unique index on
    /// `users.email` is the authoritative guard under concurrent registration.
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, ApiError> {
        if input.email.trim().is_empty() {
            return Err(ApiError::Validation("email is required".into()));
        }
        if input.name.trim().is_empty() {
            return Err(ApiError::Validation("username is required".into()));
        }
        if input.password.is_empty() {
            return Err(ApiError::Validation("password is required".into()));
        }

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::EmailTaken);
        }

        let password_hash = hash_password(&input.password).map_err(|_| ApiError::Hash)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: input.email,
            password_hash,
            name: input.name,
            avatar: input.avatar.unwrap_or_default(),
            role: UserRole::Regular,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn by_id(&self, id: Uuid) -> Result<User, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("user"))
    }

    pub async fn by_email(&self, email: &str) -> Result<User, ApiError> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or(ApiError::NotFound("user"))
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserInput {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub password: Option<String>,
}

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    /// Partial update: omitted fields keep their stored values. The password
    /// is re-hashed only when a new one is supplied.
    pub async fn execute(&self, user_id: Uuid, input: UpdateUserInput) -> Result<User, ApiError> {
        if input.name.is_none() && input.avatar.is_none() && input.password.is_none() {
            return Err(ApiError::Validation("nothing to update".into()));
        }

        let password_hash = match input.password {
            Some(ref plain) if !plain.is_empty() => {
                Some(hash_password(plain).map_err(|_| ApiError::Hash)?)
            }
            _ => None,
        };

        let update = UserUpdate {
            name: input.name,
            avatar: input.avatar,
            password_hash,
        };
        self.repo.update(user_id, &update).await?;

        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::NotFound("user"))
    }
}
