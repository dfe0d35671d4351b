use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Rating;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::identity::UserIdentity;
use crate::state::AppState;
use crate::usecase::rating::{
    ListRatingsUseCase, NewRatingInput, NewRatingUseCase, UpdateRatingUseCase,
};

#[derive(Serialize)]
pub struct RatingResponse {
    pub id: String,
    pub score: i32,
    pub user_id: String,
    pub course_id: String,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id.to_string(),
            score: rating.score,
            user_id: rating.user_id.to_string(),
            course_id: rating.course_id.to_string(),
        }
    }
}

// ── POST /ratings ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct NewRatingRequest {
    pub course_id: Uuid,
    pub score: i32,
}

pub async fn create_rating(
    identity: UserIdentity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewRatingRequest>,
) -> Result<(StatusCode, Json<RatingResponse>), ApiError> {
    let usecase = NewRatingUseCase {
        repo: state.rating_repo(),
    };
    let rating = usecase
        .execute(
            identity.user_id,
            NewRatingInput {
                course_id: body.course_id,
                score: body.score,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(rating.into())))
}

// ── PUT /ratings ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRatingRequest {
    pub id: Uuid,
    pub score: i32,
}

pub async fn update_rating(
    _identity: UserIdentity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<UpdateRatingRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = UpdateRatingUseCase {
        repo: state.rating_repo(),
    };
    usecase.execute(body.id, body.score).await?;
    Ok(StatusCode::OK)
}

// ── GET /ratings ─────────────────────────────────────────────────────────────

pub async fn list_ratings(
    State(state): State<AppState>,
) -> Result<Json<Vec<RatingResponse>>, ApiError> {
    let usecase = ListRatingsUseCase {
        repo: state.rating_repo(),
    };
    let ratings = usecase.execute().await?;
    Ok(Json(ratings.into_iter().map(Into::into).collect()))
}
