use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::EnrollmentRepository;
use crate::domain::types::{CourseView, Enrollment, StudentView};
use crate::error::ApiError;

// ── Enroll ───────────────────────────────────────────────────────────────────

pub struct EnrollUseCase<R: EnrollmentRepository> {
    pub repo: R,
}

impl<R: EnrollmentRepository> EnrollUseCase<R> {
    /// Pre-checks give the fast 400s; the composite key on
    /// `(user_id, course_id)` is the authoritative duplicate guard under
    /// concurrent requests, surfacing as DUPLICATE_IDENTIFIER.
    pub async fn execute(&self, user_id: Uuid, course_id: Uuid) -> Result<Enrollment, ApiError> {
        if !self.repo.course_exists(course_id).await? {
            return Err(ApiError::CourseMissing);
        }
        if self.repo.is_enrolled(user_id, course_id).await? {
            return Err(ApiError::AlreadyEnrolled);
        }
        self.repo.enroll(user_id, course_id).await?;
        Ok(Enrollment {
            user_id,
            course_id,
            created_at: Utc::now(),
        })
    }
}

// ── MyCourses ────────────────────────────────────────────────────────────────

pub struct MyCoursesUseCase<R: EnrollmentRepository> {
    pub repo: R,
}

impl<R: EnrollmentRepository> MyCoursesUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<CourseView>, ApiError> {
        self.repo.my_courses(user_id).await
    }
}

// ── MyStudents ───────────────────────────────────────────────────────────────

pub struct MyStudentsUseCase<R: EnrollmentRepository> {
    pub repo: R,
}

impl<R: EnrollmentRepository> MyStudentsUseCase<R> {
    pub async fn execute(&self, course_id: Uuid) -> Result<Vec<StudentView>, ApiError> {
        self.repo.students_of(course_id).await
    }
}

// ── IsEnrolled ───────────────────────────────────────────────────────────────

pub struct IsEnrolledUseCase<R: EnrollmentRepository> {
    pub repo: R,
}

impl<R: EnrollmentRepository> IsEnrolledUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, course_id: Uuid) -> Result<bool, ApiError> {
        self.repo.is_enrolled(user_id, course_id).await
    }
}
