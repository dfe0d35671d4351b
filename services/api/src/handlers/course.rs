use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Course, CourseUpdate, CourseView};
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::identity::AdminIdentity;
use crate::state::AppState;
use crate::usecase::course::{
    CreateCourseInput, CreateCourseUseCase, DeleteCourseUseCase, GetCourseUseCase,
    ListCoursesUseCase, UpdateCourseUseCase,
};

/// Course read-model view: category name and rating average included.
#[derive(Serialize)]
pub struct CourseResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: i32,
    pub init_date: String,
    pub capacity: i32,
    pub state: bool,
    pub image: String,
    pub category_id: String,
    pub category_name: String,
    pub rating_avg: f64,
}

impl From<CourseView> for CourseResponse {
    fn from(view: CourseView) -> Self {
        Self {
            id: view.id.to_string(),
            name: view.name,
            description: view.description,
            price: view.price,
            duration: view.duration,
            init_date: view.init_date,
            capacity: view.capacity,
            state: view.state,
            image: view.image,
            category_id: view.category_id.to_string(),
            category_name: view.category_name,
            rating_avg: view.rating_avg,
        }
    }
}

/// Freshly created course; no read-model fields yet.
#[derive(Serialize)]
pub struct CreatedCourseResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: i32,
    pub init_date: String,
    pub capacity: i32,
    pub state: bool,
    pub image: String,
    pub category_id: String,
}

impl From<Course> for CreatedCourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            name: course.name,
            description: course.description,
            price: course.price,
            duration: course.duration,
            init_date: course.init_date,
            capacity: course.capacity,
            state: course.state,
            image: course.image,
            category_id: course.category_id.to_string(),
        }
    }
}

pub fn parse_course_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Validation("invalid course id".into()))
}

// ── GET /courses?filter= ─────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct CourseListQuery {
    pub filter: Option<String>,
}

pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let usecase = ListCoursesUseCase {
        repo: state.course_repo(),
    };
    let views = usecase.execute(query.filter).await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}

// ── GET /courses/{id} ────────────────────────────────────────────────────────

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CourseResponse>, ApiError> {
    let id = parse_course_id(&id)?;
    let usecase = GetCourseUseCase {
        repo: state.course_repo(),
    };
    let view = usecase.execute(id).await?;
    Ok(Json(view.into()))
}

// ── POST /courses ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: i32,
    pub init_date: String,
    pub capacity: i32,
    #[serde(default)]
    pub state: bool,
    pub image: Option<String>,
    pub category_id: Uuid,
}

pub async fn create_course(
    _identity: AdminIdentity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CreatedCourseResponse>), ApiError> {
    let usecase = CreateCourseUseCase {
        repo: state.course_repo(),
    };
    let course = usecase
        .execute(CreateCourseInput {
            name: body.name,
            description: body.description,
            price: body.price,
            duration: body.duration,
            init_date: body.init_date,
            capacity: body.capacity,
            state: body.state,
            image: body.image,
            category_id: body.category_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

// ── PUT /courses/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<i32>,
    pub init_date: Option<String>,
    pub capacity: Option<i32>,
    pub state: Option<bool>,
    pub image: Option<String>,
    pub category_id: Option<Uuid>,
}

pub async fn update_course(
    _identity: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    let id = parse_course_id(&id)?;
    let usecase = UpdateCourseUseCase {
        repo: state.course_repo(),
    };
    let view = usecase
        .execute(
            id,
            CourseUpdate {
                name: body.name,
                description: body.description,
                price: body.price,
                duration: body.duration,
                init_date: body.init_date,
                capacity: body.capacity,
                state: body.state,
                image: body.image,
                category_id: body.category_id,
            },
        )
        .await?;
    Ok(Json(view.into()))
}

// ── DELETE /courses/{id} ─────────────────────────────────────────────────────

pub async fn delete_course(
    _identity: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_course_id(&id)?;
    let usecase = DeleteCourseUseCase {
        repo: state.course_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::OK)
}
