use axum::{Json, extract::State, http::HeaderMap};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::handlers::user::UserResponse;
use crate::identity::bearer_token;
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginUseCase, RefreshTokenUseCase};

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let (user, token) = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

// ── GET /auth/refresh ────────────────────────────────────────────────────────

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AuthResponse>, ApiError> {
    let old_token = bearer_token(&headers).ok_or(ApiError::InvalidToken)?;
    let usecase = RefreshTokenUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let (user, token) = usecase.execute(&old_token).await?;
    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}
