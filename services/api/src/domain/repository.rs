#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{
    Category, Comment, CommentView, Course, CourseUpdate, CourseView, Rating, StudentView, User,
    UserUpdate,
};
use crate::error::ApiError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn update(&self, id: Uuid, update: &UserUpdate) -> Result<(), ApiError>;
}

/// Repository for course categories.
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: &Category) -> Result<(), ApiError>;
    async fn list(&self) -> Result<Vec<Category>, ApiError>;
}

/// Repository for courses and their read-model.
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: &Course) -> Result<(), ApiError>;

    /// List non-deleted courses with category name and average rating.
    /// An empty `filter` returns everything; otherwise the filter matches
    /// case-insensitively against course name, description and category name.
    async fn list(&self, filter: &str) -> Result<Vec<CourseView>, ApiError>;

    /// Fetch one non-deleted course with its read-model fields. A course with
    /// zero ratings resolves with `rating_avg = 0.0`.
    async fn find_view_by_id(&self, id: Uuid) -> Result<Option<CourseView>, ApiError>;

    async fn update(&self, id: Uuid, update: &CourseUpdate) -> Result<(), ApiError>;

    /// Logical delete: marks the row and excludes it from subsequent reads.
    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError>;
}

/// Repository for course comments.
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &Comment) -> Result<(), ApiError>;
    async fn update_text(&self, id: Uuid, text: &str) -> Result<(), ApiError>;

    /// Comments of a course with author name/avatar. Fails `NOT_FOUND` when
    /// the course has no comments.
    async fn list_for_course(&self, course_id: Uuid) -> Result<Vec<CommentView>, ApiError>;
}

/// Repository for course ratings.
pub trait RatingRepository: Send + Sync {
    async fn create(&self, rating: &Rating) -> Result<(), ApiError>;
    async fn update_score(&self, id: Uuid, score: i32) -> Result<(), ApiError>;
    async fn list(&self) -> Result<Vec<Rating>, ApiError>;
}

/// Repository for user↔course enrollments, plus the lookups the enrollment
/// flow alone needs.
pub trait EnrollmentRepository: Send + Sync {
    /// Insert an enrollment row. A duplicate (user, course) pair violates the
    /// composite key and surfaces as `DUPLICATE_IDENTIFIER`.
    async fn enroll(&self, user_id: Uuid, course_id: Uuid) -> Result<(), ApiError>;

    async fn is_enrolled(&self, user_id: Uuid, course_id: Uuid) -> Result<bool, ApiError>;

    /// Whether a non-deleted course with this id exists.
    async fn course_exists(&self, course_id: Uuid) -> Result<bool, ApiError>;

    /// Courses the user is enrolled in, as the full course read-model.
    async fn my_courses(&self, user_id: Uuid) -> Result<Vec<CourseView>, ApiError>;

    /// Users enrolled in a course. Fails `NOT_FOUND` when the course has no
    /// enrollments.
    async fn students_of(&self, course_id: Uuid) -> Result<Vec<StudentView>, ApiError>;
}
