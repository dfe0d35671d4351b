use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API domain error variants.
///
/// Each variant carries a machine code (`code()`), a human message
/// (`Display`), and an HTTP status (`IntoResponse`). Storage failures are
/// classified into these variants at the data layer (`infra::db`); nothing
/// above that layer sees a raw database error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("email already registered")]
    EmailTaken,
    #[error("a record with the same identifier already exists")]
    DuplicateIdentifier,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("course does not exist")]
    CourseMissing,
    #[error("user is already enrolled in this course")]
    AlreadyEnrolled,
    #[error("password hashing failed")]
    Hash,
    #[error("database connection error")]
    DbConnection,
    #[error("error retrieving {0} from database")]
    Db(&'static str),
    #[error("an unexpected error occurred")]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::DuplicateIdentifier => "DUPLICATE_IDENTIFIER",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::CourseMissing => "COURSE_NOT_FOUND",
            Self::AlreadyEnrolled => "ALREADY_ENROLLED",
            Self::Hash => "HASH_ERROR",
            Self::DbConnection => "DB_CONNECTION_ERROR",
            Self::Db(_) => "DB_ERROR",
            Self::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::EmailTaken | Self::DuplicateIdentifier => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidToken
            | Self::Validation(_)
            | Self::CourseMissing
            | Self::AlreadyEnrolled => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Hash | Self::DbConnection | Self::Db(_) | Self::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests; 4xx are expected client errors. Internal errors need
        // the anyhow chain logged so the root cause is traceable.
        if let Self::Unexpected(ref e) = self {
            tracing::error!(error = %e, code = "UNEXPECTED_ERROR", "unexpected error");
        }
        let body = serde_json::json!({
            "code": self.code(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    async fn assert_error(
        error: ApiError,
        expected_status: StatusCode,
        expected_code: &str,
        expected_message: &str,
    ) {
        let resp = error.into_response();
        assert_eq!(resp.status(), expected_status);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], expected_code);
        assert_eq!(json["message"], expected_message);
    }

    #[tokio::test]
    async fn should_return_not_found() {
        assert_error(
            ApiError::NotFound("course"),
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "course not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_email_taken() {
        assert_error(
            ApiError::EmailTaken,
            StatusCode::CONFLICT,
            "EMAIL_TAKEN",
            "email already registered",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_duplicate_identifier() {
        assert_error(
            ApiError::DuplicateIdentifier,
            StatusCode::CONFLICT,
            "DUPLICATE_IDENTIFIER",
            "a record with the same identifier already exists",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_invalid_credentials() {
        assert_error(
            ApiError::InvalidCredentials,
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            "invalid credentials",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_invalid_token() {
        assert_error(
            ApiError::InvalidToken,
            StatusCode::BAD_REQUEST,
            "INVALID_TOKEN",
            "invalid token",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_unauthorized() {
        assert_error(
            ApiError::Unauthorized,
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "unauthorized",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_forbidden() {
        assert_error(
            ApiError::Forbidden,
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "forbidden",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_validation_error() {
        assert_error(
            ApiError::Validation("email is required".into()),
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "email is required",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_course_missing() {
        assert_error(
            ApiError::CourseMissing,
            StatusCode::BAD_REQUEST,
            "COURSE_NOT_FOUND",
            "course does not exist",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_already_enrolled() {
        assert_error(
            ApiError::AlreadyEnrolled,
            StatusCode::BAD_REQUEST,
            "ALREADY_ENROLLED",
            "user is already enrolled in this course",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_db_connection_error() {
        assert_error(
            ApiError::DbConnection,
            StatusCode::INTERNAL_SERVER_ERROR,
            "DB_CONNECTION_ERROR",
            "database connection error",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_db_error() {
        assert_error(
            ApiError::Db("course"),
            StatusCode::INTERNAL_SERVER_ERROR,
            "DB_ERROR",
            "error retrieving course from database",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_unexpected() {
        assert_error(
            ApiError::Unexpected(anyhow::anyhow!("db down")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "UNEXPECTED_ERROR",
            "an unexpected error occurred",
        )
        .await;
    }
}
