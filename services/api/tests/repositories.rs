//! Repository tests against in-memory SQLite with the real migrations
//! applied, covering the read-model joins, logical deletion, and the
//! storage-level uniqueness guarantees.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use aula_api::domain::repository::{
    CategoryRepository, CommentRepository, CourseRepository, EnrollmentRepository,
    RatingRepository, UserRepository,
};
use aula_api::domain::types::{Category, Comment, Course, Rating, User, UserUpdate};
use aula_api::error::ApiError;
use aula_api::state::AppState;
use aula_api_migration::Migrator;
use aula_domain::role::UserRole;

async fn setup() -> AppState {
    // A single connection keeps every query on the same in-memory database.
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db: DatabaseConnection = Database::connect(opts)
        .await
        .expect("failed to open sqlite db");
    Migrator::up(&db, None).await.expect("migrations");
    AppState {
        db,
        jwt_secret: "testsecret".into(),
    }
}

fn make_user(email: &str, name: &str, avatar: &str) -> User {
    let now = chrono::Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.into(),
        password_hash: "$argon2id$dummy".into(),
        name: name.into(),
        avatar: avatar.into(),
        role: UserRole::Regular,
        created_at: now,
        updated_at: now,
    }
}

fn make_course(name: &str, description: &str, category_id: Uuid) -> Course {
    Course {
        id: Uuid::new_v4(),
        name: name.into(),
        description: description.into(),
        price: 10.0,
        duration: 8,
        init_date: "2025-01-01".into(),
        capacity: 30,
        state: true,
        image: "img".into(),
        category_id,
    }
}

async fn seed_category(state: &AppState, name: &str) -> Category {
    let category = Category {
        id: Uuid::new_v4(),
        name: name.into(),
    };
    state.category_repo().create(&category).await.unwrap();
    category
}

#[tokio::test]
async fn course_list_joins_category_and_average_rating() {
    let state = setup().await;
    let category = seed_category(&state, "Backend").await;
    let course = make_course("Golang", "intro", category.id);
    state.course_repo().create(&course).await.unwrap();

    let user = make_user("a@b.com", "Alice", "pic.png");
    state.user_repo().create(&user).await.unwrap();
    state
        .rating_repo()
        .create(&Rating {
            id: Uuid::new_v4(),
            score: 4,
            user_id: user.id,
            course_id: course.id,
        })
        .await
        .unwrap();

    let views = state.course_repo().list("").await.unwrap();
    assert_eq!(views.len(), 1);
    let view = &views[0];
    assert_eq!(view.name, "Golang");
    assert_eq!(view.category_name, "Backend");
    assert!((view.rating_avg - 4.0).abs() < 1e-9);
    assert!((view.price - 10.0).abs() < 1e-9);
    assert_eq!(view.duration, 8);
    assert_eq!(view.capacity, 30);
    assert!(view.state);
}

#[tokio::test]
async fn course_list_on_empty_table_returns_empty_list() {
    let state = setup().await;
    let views = state.course_repo().list("").await.unwrap();
    assert!(views.is_empty());
}

#[tokio::test]
async fn course_filter_matches_name_description_and_category() {
    let state = setup().await;
    let backend = seed_category(&state, "Backend").await;
    let art = seed_category(&state, "Art").await;
    let repo = state.course_repo();
    repo.create(&make_course("Golang", "server programming", backend.id))
        .await
        .unwrap();
    repo.create(&make_course("Watercolors", "painting", art.id))
        .await
        .unwrap();

    // case-insensitive match on course name
    let hits = repo.list("GOLA").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Golang");

    // match on description
    let hits = repo.list("painting").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Watercolors");

    // match on category name
    let hits = repo.list("backend").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Golang");

    // no match
    let hits = repo.list("xyz").await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn course_with_zero_ratings_is_reachable_by_id() {
    let state = setup().await;
    let category = seed_category(&state, "Backend").await;
    let course = make_course("Fresh", "no ratings yet", category.id);
    state.course_repo().create(&course).await.unwrap();

    let view = state
        .course_repo()
        .find_view_by_id(course.id)
        .await
        .unwrap()
        .expect("course should resolve without ratings");
    assert_eq!(view.name, "Fresh");
    assert_eq!(view.rating_avg, 0.0);
}

#[tokio::test]
async fn soft_deleted_course_is_excluded_from_reads() {
    let state = setup().await;
    let category = seed_category(&state, "Backend").await;
    let course = make_course("Doomed", "gone soon", category.id);
    let repo = state.course_repo();
    repo.create(&course).await.unwrap();

    repo.soft_delete(course.id).await.unwrap();

    assert!(repo.list("").await.unwrap().is_empty());
    assert!(repo.find_view_by_id(course.id).await.unwrap().is_none());
    assert!(!state
        .enrollment_repo()
        .course_exists(course.id)
        .await
        .unwrap());
}

#[tokio::test]
async fn duplicate_email_is_rejected_by_unique_index() {
    let state = setup().await;
    let repo = state.user_repo();
    repo.create(&make_user("dup@ex.com", "First", ""))
        .await
        .unwrap();

    let err = repo
        .create(&make_user("dup@ex.com", "Second", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::EmailTaken));

    // only the first row is visible
    let found = repo.find_by_email("dup@ex.com").await.unwrap().unwrap();
    assert_eq!(found.name, "First");
}

#[tokio::test]
async fn user_partial_update_preserves_omitted_fields() {
    let state = setup().await;
    let repo = state.user_repo();
    let user = make_user("c@ex.com", "Carol", "old.png");
    repo.create(&user).await.unwrap();

    repo.update(
        user.id,
        &UserUpdate {
            name: Some("Changed".into()),
            avatar: None,
            password_hash: None,
        },
    )
    .await
    .unwrap();

    let found = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Changed");
    assert_eq!(found.avatar, "old.png");
    assert_eq!(found.password_hash, user.password_hash);
}

#[tokio::test]
async fn comment_read_model_includes_author() {
    let state = setup().await;
    let category = seed_category(&state, "Backend").await;
    let course = make_course("Golang", "intro", category.id);
    state.course_repo().create(&course).await.unwrap();
    let user = make_user("a@b.com", "Alice", "pic.png");
    state.user_repo().create(&user).await.unwrap();

    let repo = state.comment_repo();
    let comment = Comment {
        id: Uuid::new_v4(),
        text: "hi".into(),
        user_id: user.id,
        course_id: course.id,
    };
    repo.create(&comment).await.unwrap();
    repo.update_text(comment.id, "updated").await.unwrap();

    let views = repo.list_for_course(course.id).await.unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].text, "updated");
    assert_eq!(views[0].user_name, "Alice");
    assert_eq!(views[0].user_avatar, "pic.png");
}

#[tokio::test]
async fn comments_of_untouched_course_fail_not_found() {
    let state = setup().await;
    let category = seed_category(&state, "Backend").await;
    let course = make_course("Quiet", "", category.id);
    state.course_repo().create(&course).await.unwrap();

    let err = state
        .comment_repo()
        .list_for_course(course.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn second_enrollment_violates_composite_key() {
    let state = setup().await;
    let category = seed_category(&state, "Backend").await;
    let course = make_course("Golang", "intro", category.id);
    state.course_repo().create(&course).await.unwrap();
    let user = make_user("a@b.com", "Alice", "pic.png");
    state.user_repo().create(&user).await.unwrap();

    let repo = state.enrollment_repo();
    repo.enroll(user.id, course.id).await.unwrap();
    assert!(repo.is_enrolled(user.id, course.id).await.unwrap());

    // bypass the service pre-check: the key itself must reject the duplicate
    let err = repo.enroll(user.id, course.id).await.unwrap_err();
    assert!(matches!(err, ApiError::DuplicateIdentifier));

    let students = repo.students_of(course.id).await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].name, "Alice");
}

#[tokio::test]
async fn my_courses_returns_enrolled_course_views() {
    let state = setup().await;
    let category = seed_category(&state, "Backend").await;
    let course = make_course("Golang", "intro", category.id);
    state.course_repo().create(&course).await.unwrap();
    let user = make_user("c@c.com", "Carol", "c.png");
    state.user_repo().create(&user).await.unwrap();

    let repo = state.enrollment_repo();
    repo.enroll(user.id, course.id).await.unwrap();

    let mine = repo.my_courses(user.id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].name, "Golang");
    assert_eq!(mine[0].category_name, "Backend");
    assert_eq!(mine[0].rating_avg, 0.0);

    // other users see nothing
    let other = make_user("d@d.com", "Dave", "");
    state.user_repo().create(&other).await.unwrap();
    assert!(repo.my_courses(other.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn students_of_empty_course_fail_not_found() {
    let state = setup().await;
    let category = seed_category(&state, "Backend").await;
    let course = make_course("NoStudents", "", category.id);
    state.course_repo().create(&course).await.unwrap();

    let err = state
        .enrollment_repo()
        .students_of(course.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
