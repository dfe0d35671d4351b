use chrono::{DateTime, Utc};
use uuid::Uuid;

use aula_domain::role::UserRole;

/// Registered account. `password_hash` never leaves the service layer.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub avatar: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial user update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: i32,
    pub init_date: String,
    pub capacity: i32,
    pub state: bool,
    pub image: String,
    pub category_id: Uuid,
}

/// Partial course update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
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

/// Course read-model: the course joined with its category name and the
/// average of its rating rows (0.0 when it has none).
#[derive(Debug, Clone)]
pub struct CourseView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: i32,
    pub init_date: String,
    pub capacity: i32,
    pub state: bool,
    pub image: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub rating_avg: f64,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub user_id: Uuid,
    pub course_id: Uuid,
}

/// Comment read-model enriched with the author's display data.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub id: Uuid,
    pub text: String,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_avatar: String,
}

#[derive(Debug, Clone)]
pub struct Rating {
    pub id: Uuid,
    pub score: i32,
    pub user_id: Uuid,
    pub course_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct Enrollment {
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Enrolled-user read-model for "my students".
#[derive(Debug, Clone)]
pub struct StudentView {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}
