use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Comment, CommentView};
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::handlers::course::parse_course_id;
use crate::identity::UserIdentity;
use crate::state::AppState;
use crate::usecase::comment::{
    GetCourseCommentsUseCase, NewCommentInput, NewCommentUseCase, UpdateCommentUseCase,
};

#[derive(Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub text: String,
    pub user_id: String,
    pub course_id: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            text: comment.text,
            user_id: comment.user_id.to_string(),
            course_id: comment.course_id.to_string(),
        }
    }
}

/// Comment enriched with author display data for course pages.
#[derive(Serialize)]
pub struct CommentViewResponse {
    pub id: String,
    pub text: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
}

impl From<CommentView> for CommentViewResponse {
    fn from(view: CommentView) -> Self {
        Self {
            id: view.id.to_string(),
            text: view.text,
            user_id: view.user_id.to_string(),
            user_name: view.user_name,
            user_avatar: view.user_avatar,
        }
    }
}

// ── POST /comments ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct NewCommentRequest {
    pub course_id: Uuid,
    pub text: String,
}

pub async fn create_comment(
    identity: UserIdentity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let usecase = NewCommentUseCase {
        repo: state.comment_repo(),
    };
    let comment = usecase
        .execute(
            identity.user_id,
            NewCommentInput {
                course_id: body.course_id,
                text: body.text,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

// ── PUT /comments ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCommentRequest {
    pub id: Uuid,
    pub text: String,
}

pub async fn update_comment(
    _identity: UserIdentity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<UpdateCommentRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = UpdateCommentUseCase {
        repo: state.comment_repo(),
    };
    usecase.execute(body.id, body.text).await?;
    Ok(StatusCode::OK)
}

// ── GET /comments/{course_id} ────────────────────────────────────────────────

pub async fn course_comments(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<CommentViewResponse>>, ApiError> {
    let course_id = parse_course_id(&course_id)?;
    let usecase = GetCourseCommentsUseCase {
        repo: state.comment_repo(),
    };
    let views = usecase.execute(course_id).await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}
