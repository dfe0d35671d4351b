use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::StudentView;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::handlers::course::{CourseResponse, parse_course_id};
use crate::identity::UserIdentity;
use crate::state::AppState;
use crate::usecase::enrollment::{
    EnrollUseCase, IsEnrolledUseCase, MyCoursesUseCase, MyStudentsUseCase,
};

#[derive(Serialize)]
pub struct EnrollmentResponse {
    pub user_id: String,
    pub course_id: String,
}

#[derive(Serialize)]
pub struct StudentResponse {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl From<StudentView> for StudentResponse {
    fn from(student: StudentView) -> Self {
        Self {
            id: student.id.to_string(),
            name: student.name,
            avatar: student.avatar,
        }
    }
}

// ── POST /inscriptions ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EnrollRequest {
    pub course_id: Uuid,
}

pub async fn enroll(
    identity: UserIdentity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<EnrollRequest>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    let usecase = EnrollUseCase {
        repo: state.enrollment_repo(),
    };
    let enrollment = usecase.execute(identity.user_id, body.course_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(EnrollmentResponse {
            user_id: enrollment.user_id.to_string(),
            course_id: enrollment.course_id.to_string(),
        }),
    ))
}

// ── GET /inscriptions/mine ───────────────────────────────────────────────────

pub async fn my_courses(
    identity: UserIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let usecase = MyCoursesUseCase {
        repo: state.enrollment_repo(),
    };
    let views = usecase.execute(identity.user_id).await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}

// ── GET /inscriptions/students/{course_id} ───────────────────────────────────

pub async fn course_students(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let course_id = parse_course_id(&course_id)?;
    let usecase = MyStudentsUseCase {
        repo: state.enrollment_repo(),
    };
    let students = usecase.execute(course_id).await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

// ── GET /inscriptions/enrolled/{course_id} ───────────────────────────────────

#[derive(Serialize)]
pub struct EnrolledResponse {
    pub enrolled: bool,
}

pub async fn is_enrolled(
    identity: UserIdentity,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<EnrolledResponse>, ApiError> {
    let course_id = parse_course_id(&course_id)?;
    let usecase = IsEnrolledUseCase {
        repo: state.enrollment_repo(),
    };
    let enrolled = usecase.execute(identity.user_id, course_id).await?;
    Ok(Json(EnrolledResponse { enrolled }))
}
