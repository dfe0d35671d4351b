use axum::{Json, extract::Query, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::types::User;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::identity::UserIdentity;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, GetUserUseCase, UpdateUserInput, UpdateUserUseCase,
};

/// Public user view. The password hash never appears here.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub avatar: String,
    pub role: u8,
    #[serde(serialize_with = "aula_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "aula_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            username: user.name,
            avatar: user.avatar,
            role: user.role.as_u8(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub avatar: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(CreateUserInput {
            email: body.email,
            name: body.username,
            password: body.password,
            avatar: body.avatar,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users/email?email= ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

pub async fn find_by_email(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<UserResponse>, ApiError> {
    let email = query
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::Validation("email query parameter is required".into()))?;
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.by_email(&email).await?;
    Ok(Json(user.into()))
}

// ── PUT /users ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub password: Option<String>,
}

pub async fn update_user(
    identity: UserIdentity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<UpdateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            UpdateUserInput {
                name: body.username,
                avatar: body.avatar,
                password: body.password,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}
