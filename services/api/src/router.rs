use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use aula_core::health::health;
use aula_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{login, refresh},
    category::{create_category, list_categories},
    comment::{course_comments, create_comment, update_comment},
    course::{create_course, delete_course, get_course, list_courses, update_course},
    enrollment::{course_students, enroll, is_enrolled, my_courses},
    rating::{create_rating, list_ratings, update_rating},
    user::{find_by_email, register, update_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health))
        // Auth
        .route("/auth/login", post(login))
        .route("/auth/refresh", get(refresh))
        // Users
        .route("/users", post(register).put(update_user))
        .route("/users/email", get(find_by_email))
        // Courses
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        // Categories
        .route("/categories", get(list_categories).post(create_category))
        // Comments
        .route("/comments", post(create_comment).put(update_comment))
        .route("/comments/{course_id}", get(course_comments))
        // Ratings
        .route(
            "/ratings",
            get(list_ratings).post(create_rating).put(update_rating),
        )
        // Inscriptions
        .route("/inscriptions", post(enroll))
        .route("/inscriptions/mine", get(my_courses))
        .route("/inscriptions/students/{course_id}", get(course_students))
        .route("/inscriptions/enrolled/{course_id}", get(is_enrolled))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::new()),
        )
        .with_state(state)
}
