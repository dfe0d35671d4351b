use uuid::Uuid;

use crate::domain::repository::RatingRepository;
use crate::domain::types::Rating;
use crate::error::ApiError;

// ── NewRating ────────────────────────────────────────────────────────────────

pub struct NewRatingInput {
    pub course_id: Uuid,
    pub score: i32,
}

pub struct NewRatingUseCase<R: RatingRepository> {
    pub repo: R,
}

impl<R: RatingRepository> NewRatingUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, input: NewRatingInput) -> Result<Rating, ApiError> {
        let rating = Rating {
            id: Uuid::new_v4(),
            score: input.score,
            user_id,
            course_id: input.course_id,
        };
        self.repo.create(&rating).await?;
        Ok(rating)
    }
}

// ── UpdateRating ─────────────────────────────────────────────────────────────

pub struct UpdateRatingUseCase<R: RatingRepository> {
    pub repo: R,
}

impl<R: RatingRepository> UpdateRatingUseCase<R> {
    pub async fn execute(&self, id: Uuid, score: i32) -> Result<(), ApiError> {
        self.repo.update_score(id, score).await
    }
}

// ── ListRatings ──────────────────────────────────────────────────────────────

pub struct ListRatingsUseCase<R: RatingRepository> {
    pub repo: R,
}

impl<R: RatingRepository> ListRatingsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Rating>, ApiError> {
        self.repo.list().await
    }
}
