use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryResult, Statement,
    sea_query::Expr,
};
use uuid::Uuid;

use aula_api_schema::{categories, comments, courses, enrollments, ratings, users};
use aula_domain::role::UserRole;

use crate::domain::repository::{
    CategoryRepository, CommentRepository, CourseRepository, EnrollmentRepository,
    RatingRepository, UserRepository,
};
use crate::domain::types::{
    Category, Comment, CommentView, Course, CourseUpdate, CourseView, Rating, StudentView, User,
    UserUpdate,
};
use crate::error::ApiError;

// ── Storage error classification ─────────────────────────────────────────────

/// Classify a write-path failure. `duplicate` is the error for a
/// unique-constraint violation (EMAIL_TAKEN for users, DUPLICATE_IDENTIFIER
/// elsewhere); connection loss maps to DB_CONNECTION_ERROR and anything else
/// to UNEXPECTED_ERROR. Classification inspects sea-orm's typed error kinds,
/// never the error text.
fn classify_write(err: DbErr, duplicate: ApiError) -> ApiError {
    if matches!(err.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))) {
        return duplicate;
    }
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            tracing::error!(error = %err, "database connection failure");
            ApiError::DbConnection
        }
        other => ApiError::Unexpected(anyhow::Error::new(other)),
    }
}

/// Classify a read-path failure as DB_ERROR for the given entity, logging the
/// underlying cause (the taxonomy code does not carry it).
fn read_err(entity: &'static str) -> impl FnOnce(DbErr) -> ApiError {
    move |err| {
        tracing::error!(error = %err, entity, "database read failure");
        ApiError::Db(entity)
    }
}

// ── Row normalization helpers ────────────────────────────────────────────────
//
// Raw read-model scans can surface engine-dependent native types (booleans as
// integers, aggregates as text). Normalize with best-effort parses defaulting
// to zero/false.

fn get_f64(res: &QueryResult, col: &str) -> f64 {
    if let Ok(v) = res.try_get::<f64>("", col) {
        return v;
    }
    if let Ok(v) = res.try_get::<f32>("", col) {
        return v as f64;
    }
    if let Ok(v) = res.try_get::<i64>("", col) {
        return v as f64;
    }
    if let Ok(v) = res.try_get::<i32>("", col) {
        return v as f64;
    }
    res.try_get::<String>("", col)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0.0)
}

fn get_i32(res: &QueryResult, col: &str) -> i32 {
    if let Ok(v) = res.try_get::<i32>("", col) {
        return v;
    }
    if let Ok(v) = res.try_get::<i64>("", col) {
        return v as i32;
    }
    if let Ok(v) = res.try_get::<f64>("", col) {
        return v as i32;
    }
    res.try_get::<String>("", col)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn get_bool(res: &QueryResult, col: &str) -> bool {
    if let Ok(v) = res.try_get::<bool>("", col) {
        return v;
    }
    if let Ok(v) = res.try_get::<i64>("", col) {
        return v != 0;
    }
    if let Ok(v) = res.try_get::<i32>("", col) {
        return v != 0;
    }
    if let Ok(v) = res.try_get::<f64>("", col) {
        return v != 0.0;
    }
    res.try_get::<String>("", col)
        .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

impl FromQueryResult for CourseView {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            id: res.try_get(pre, "id")?,
            name: res.try_get(pre, "name")?,
            description: res.try_get(pre, "description")?,
            price: get_f64(res, "price"),
            duration: get_i32(res, "duration"),
            init_date: res.try_get(pre, "init_date")?,
            capacity: get_i32(res, "capacity"),
            state: get_bool(res, "state"),
            image: res.try_get(pre, "image")?,
            category_id: res.try_get(pre, "category_id")?,
            category_name: res.try_get(pre, "category_name")?,
            rating_avg: get_f64(res, "rating_avg"),
        })
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            name: Set(user.name.clone()),
            avatar: Set(user.avatar.clone()),
            role: Set(user.role.as_u8() as i16),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| classify_write(e, ApiError::EmailTaken))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_err("user"))?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(read_err("user"))?;
        Ok(model.map(user_from_model))
    }

    async fn update(&self, id: Uuid, update: &UserUpdate) -> Result<(), ApiError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref name) = update.name {
            am.name = Set(name.clone());
        }
        if let Some(ref avatar) = update.avatar {
            am.avatar = Set(avatar.clone());
        }
        if let Some(ref password_hash) = update.password_hash {
            am.password_hash = Set(password_hash.clone());
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db)
            .await
            .map_err(|e| classify_write(e, ApiError::EmailTaken))?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        name: model.name,
        avatar: model.avatar,
        role: UserRole::from_u8(model.role as u8).unwrap_or_default(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Category repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl CategoryRepository for DbCategoryRepository {
    async fn create(&self, category: &Category) -> Result<(), ApiError> {
        categories::ActiveModel {
            id: Set(category.id),
            name: Set(category.name.clone()),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| classify_write(e, ApiError::DuplicateIdentifier))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Category>, ApiError> {
        let models = categories::Entity::find()
            .all(&self.db)
            .await
            .map_err(read_err("category"))?;
        Ok(models
            .into_iter()
            .map(|m| Category {
                id: m.id,
                name: m.name,
            })
            .collect())
    }
}

// ── Course repository ────────────────────────────────────────────────────────

/// Shared SELECT for the course read-model: category name joined in, rating
/// average from a grouped sub-select, zero-defaulted and cast so every engine
/// returns a float.
const COURSE_VIEW_SQL: &str = r#"
SELECT
    courses.id, courses.name, courses.description, courses.price,
    courses.duration, courses.init_date, courses.capacity, courses.state,
    courses.image, courses.category_id,
    categories.name AS category_name,
    CAST(COALESCE(r.rating_avg, 0) AS DOUBLE PRECISION) AS rating_avg
FROM courses
JOIN categories ON courses.category_id = categories.id
LEFT JOIN (
    SELECT course_id, AVG(score) AS rating_avg
    FROM ratings
    GROUP BY course_id
) AS r ON courses.id = r.course_id
"#;

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
}

impl CourseRepository for DbCourseRepository {
    async fn create(&self, course: &Course) -> Result<(), ApiError> {
        let now = Utc::now();
        courses::ActiveModel {
            id: Set(course.id),
            name: Set(course.name.clone()),
            description: Set(course.description.clone()),
            price: Set(course.price),
            duration: Set(course.duration),
            init_date: Set(course.init_date.clone()),
            capacity: Set(course.capacity),
            state: Set(course.state),
            image: Set(course.image.clone()),
            category_id: Set(course.category_id),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| classify_write(e, ApiError::DuplicateIdentifier))?;
        Ok(())
    }

    async fn list(&self, filter: &str) -> Result<Vec<CourseView>, ApiError> {
        let backend = self.db.get_database_backend();
        let stmt = if filter.is_empty() {
            Statement::from_string(
                backend,
                format!("{COURSE_VIEW_SQL} WHERE courses.deleted_at IS NULL"),
            )
        } else {
            let sql = format!(
                "{COURSE_VIEW_SQL} WHERE courses.deleted_at IS NULL AND ( \
                     LOWER(courses.name) LIKE LOWER($1) OR \
                     LOWER(courses.description) LIKE LOWER($1) OR \
                     LOWER(categories.name) LIKE LOWER($1))"
            );
            Statement::from_sql_and_values(backend, sql, [format!("%{filter}%").into()])
        };
        CourseView::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(read_err("course"))
    }

    async fn find_view_by_id(&self, id: Uuid) -> Result<Option<CourseView>, ApiError> {
        let sql =
            format!("{COURSE_VIEW_SQL} WHERE courses.deleted_at IS NULL AND courses.id = $1");
        let stmt =
            Statement::from_sql_and_values(self.db.get_database_backend(), sql, [id.into()]);
        CourseView::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(read_err("course"))
    }

    async fn update(&self, id: Uuid, update: &CourseUpdate) -> Result<(), ApiError> {
        let mut am = courses::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref name) = update.name {
            am.name = Set(name.clone());
        }
        if let Some(ref description) = update.description {
            am.description = Set(description.clone());
        }
        if let Some(price) = update.price {
            am.price = Set(price);
        }
        if let Some(duration) = update.duration {
            am.duration = Set(duration);
        }
        if let Some(ref init_date) = update.init_date {
            am.init_date = Set(init_date.clone());
        }
        if let Some(capacity) = update.capacity {
            am.capacity = Set(capacity);
        }
        if let Some(state) = update.state {
            am.state = Set(state);
        }
        if let Some(ref image) = update.image {
            am.image = Set(image.clone());
        }
        if let Some(category_id) = update.category_id {
            am.category_id = Set(category_id);
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db)
            .await
            .map_err(|e| classify_write(e, ApiError::DuplicateIdentifier))?;
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError> {
        courses::Entity::update_many()
            .filter(courses::Column::Id.eq(id))
            .col_expr(courses::Column::DeletedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .map_err(|e| classify_write(e, ApiError::DuplicateIdentifier))?;
        Ok(())
    }
}

// ── Comment repository ───────────────────────────────────────────────────────

#[derive(Debug, FromQueryResult)]
struct CommentViewRow {
    id: Uuid,
    text: String,
    user_id: Uuid,
    user_name: String,
    user_avatar: String,
}

#[derive(Clone)]
pub struct DbCommentRepository {
    pub db: DatabaseConnection,
}

impl CommentRepository for DbCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<(), ApiError> {
        let now = Utc::now();
        comments::ActiveModel {
            id: Set(comment.id),
            text: Set(comment.text.clone()),
            user_id: Set(comment.user_id),
            course_id: Set(comment.course_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| classify_write(e, ApiError::DuplicateIdentifier))?;
        Ok(())
    }

    async fn update_text(&self, id: Uuid, text: &str) -> Result<(), ApiError> {
        comments::ActiveModel {
            id: Set(id),
            text: Set(text.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| classify_write(e, ApiError::DuplicateIdentifier))?;
        Ok(())
    }

    async fn list_for_course(&self, course_id: Uuid) -> Result<Vec<CommentView>, ApiError> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT comments.id, comments.text, comments.user_id,
                   users.name AS user_name, users.avatar AS user_avatar
            FROM comments
            JOIN users ON comments.user_id = users.id
            WHERE comments.course_id = $1
            ORDER BY comments.created_at
            "#,
            [course_id.into()],
        );
        let rows = CommentViewRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(read_err("comment"))?;
        if rows.is_empty() {
            return Err(ApiError::NotFound("comments"));
        }
        Ok(rows
            .into_iter()
            .map(|r| CommentView {
                id: r.id,
                text: r.text,
                user_id: r.user_id,
                user_name: r.user_name,
                user_avatar: r.user_avatar,
            })
            .collect())
    }
}

// ── Rating repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRatingRepository {
    pub db: DatabaseConnection,
}

impl RatingRepository for DbRatingRepository {
    async fn create(&self, rating: &Rating) -> Result<(), ApiError> {
        let now = Utc::now();
        ratings::ActiveModel {
            id: Set(rating.id),
            score: Set(rating.score),
            user_id: Set(rating.user_id),
            course_id: Set(rating.course_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| classify_write(e, ApiError::DuplicateIdentifier))?;
        Ok(())
    }

    async fn update_score(&self, id: Uuid, score: i32) -> Result<(), ApiError> {
        ratings::ActiveModel {
            id: Set(id),
            score: Set(score),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| classify_write(e, ApiError::DuplicateIdentifier))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Rating>, ApiError> {
        let models = ratings::Entity::find()
            .all(&self.db)
            .await
            .map_err(read_err("rating"))?;
        Ok(models
            .into_iter()
            .map(|m| Rating {
                id: m.id,
                score: m.score,
                user_id: m.user_id,
                course_id: m.course_id,
            })
            .collect())
    }
}

// ── Enrollment repository ────────────────────────────────────────────────────

#[derive(Debug, FromQueryResult)]
struct StudentRow {
    id: Uuid,
    name: String,
    avatar: String,
}

#[derive(Clone)]
pub struct DbEnrollmentRepository {
    pub db: DatabaseConnection,
}

impl EnrollmentRepository for DbEnrollmentRepository {
    async fn enroll(&self, user_id: Uuid, course_id: Uuid) -> Result<(), ApiError> {
        enrollments::ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| classify_write(e, ApiError::DuplicateIdentifier))?;
        Ok(())
    }

    async fn is_enrolled(&self, user_id: Uuid, course_id: Uuid) -> Result<bool, ApiError> {
        let model = enrollments::Entity::find_by_id((user_id, course_id))
            .one(&self.db)
            .await
            .map_err(read_err("enrollment"))?;
        Ok(model.is_some())
    }

    async fn course_exists(&self, course_id: Uuid) -> Result<bool, ApiError> {
        let count = courses::Entity::find()
            .filter(courses::Column::Id.eq(course_id))
            .filter(courses::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(read_err("course"))?;
        Ok(count > 0)
    }

    async fn my_courses(&self, user_id: Uuid) -> Result<Vec<CourseView>, ApiError> {
        let sql = format!(
            "{COURSE_VIEW_SQL} JOIN enrollments ON enrollments.course_id = courses.id \
             WHERE enrollments.user_id = $1 AND courses.deleted_at IS NULL"
        );
        let stmt =
            Statement::from_sql_and_values(self.db.get_database_backend(), sql, [user_id.into()]);
        CourseView::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(read_err("course"))
    }

    async fn students_of(&self, course_id: Uuid) -> Result<Vec<StudentView>, ApiError> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT users.id, users.name, users.avatar
            FROM enrollments
            JOIN users ON enrollments.user_id = users.id
            WHERE enrollments.course_id = $1
            ORDER BY enrollments.created_at
            "#,
            [course_id.into()],
        );
        let rows = StudentRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(read_err("enrollment"))?;
        if rows.is_empty() {
            return Err(ApiError::NotFound("students"));
        }
        Ok(rows
            .into_iter()
            .map(|r| StudentView {
                id: r.id,
                name: r.name,
                avatar: r.avatar,
            })
            .collect())
    }
}
