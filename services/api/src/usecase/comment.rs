use uuid::Uuid;

use crate::domain::repository::CommentRepository;
use crate::domain::types::{Comment, CommentView};
use crate::error::ApiError;

// ── NewComment ───────────────────────────────────────────────────────────────

pub struct NewCommentInput {
    pub course_id: Uuid,
    pub text: String,
}

pub struct NewCommentUseCase<R: CommentRepository> {
    pub repo: R,
}

impl<R: CommentRepository> NewCommentUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, input: NewCommentInput) -> Result<Comment, ApiError> {
        if input.text.trim().is_empty() {
            return Err(ApiError::Validation("comment text is required".into()));
        }
        let comment = Comment {
            id: Uuid::new_v4(),
            text: input.text,
            user_id,
            course_id: input.course_id,
        };
        self.repo.create(&comment).await?;
        Ok(comment)
    }
}

// ── UpdateComment ────────────────────────────────────────────────────────────

pub struct UpdateCommentUseCase<R: CommentRepository> {
    pub repo: R,
}

impl<R: CommentRepository> UpdateCommentUseCase<R> {
    pub async fn execute(&self, id: Uuid, text: String) -> Result<(), ApiError> {
        if text.trim().is_empty() {
            return Err(ApiError::Validation("comment text is required".into()));
        }
        self.repo.update_text(id, &text).await
    }
}

// ── GetCourseComments ────────────────────────────────────────────────────────

pub struct GetCourseCommentsUseCase<R: CommentRepository> {
    pub repo: R,
}

impl<R: CommentRepository> GetCourseCommentsUseCase<R> {
    pub async fn execute(&self, course_id: Uuid) -> Result<Vec<CommentView>, ApiError> {
        self.repo.list_for_course(course_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MockCommentRepo {
        comments: Mutex<Vec<Comment>>,
    }

    impl CommentRepository for MockCommentRepo {
        async fn create(&self, comment: &Comment) -> Result<(), ApiError> {
            self.comments.lock().unwrap().push(comment.clone());
            Ok(())
        }
        async fn update_text(&self, id: Uuid, text: &str) -> Result<(), ApiError> {
            let mut comments = self.comments.lock().unwrap();
            if let Some(c) = comments.iter_mut().find(|c| c.id == id) {
                c.text = text.to_owned();
            }
            Ok(())
        }
        async fn list_for_course(&self, course_id: Uuid) -> Result<Vec<CommentView>, ApiError> {
            let rows: Vec<CommentView> = self
                .comments
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.course_id == course_id)
                .map(|c| CommentView {
                    id: c.id,
                    text: c.text.clone(),
                    user_id: c.user_id,
                    user_name: "Alice".into(),
                    user_avatar: "pic.png".into(),
                })
                .collect();
            if rows.is_empty() {
                return Err(ApiError::NotFound("comments"));
            }
            Ok(rows)
        }
    }

    #[tokio::test]
    async fn should_create_update_and_list() {
        let repo = MockCommentRepo {
            comments: Mutex::new(vec![]),
        };
        let course_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let create = NewCommentUseCase { repo };
        let comment = create
            .execute(
                user_id,
                NewCommentInput {
                    course_id,
                    text: "hi".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(comment.text, "hi");

        let update = UpdateCommentUseCase { repo: create.repo };
        update.execute(comment.id, "updated".into()).await.unwrap();

        let list = GetCourseCommentsUseCase { repo: update.repo };
        let views = list.execute(course_id).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].text, "updated");
        assert_eq!(views[0].user_name, "Alice");
        assert_eq!(views[0].user_avatar, "pic.png");
    }

    #[tokio::test]
    async fn should_fail_not_found_for_course_without_comments() {
        let list = GetCourseCommentsUseCase {
            repo: MockCommentRepo {
                comments: Mutex::new(vec![]),
            },
        };
        let err = list.execute(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn should_reject_blank_text() {
        let create = NewCommentUseCase {
            repo: MockCommentRepo {
                comments: Mutex::new(vec![]),
            },
        };
        let err = create
            .execute(
                Uuid::new_v4(),
                NewCommentInput {
                    course_id: Uuid::new_v4(),
                    text: "  ".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
