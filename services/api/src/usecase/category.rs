use uuid::Uuid;

use crate::domain::repository::CategoryRepository;
use crate::domain::types::Category;
use crate::error::ApiError;

// ── CreateCategory ───────────────────────────────────────────────────────────

pub struct CreateCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> CreateCategoryUseCase<R> {
    pub async fn execute(&self, name: String) -> Result<Category, ApiError> {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("category name is required".into()));
        }
        let category = Category {
            id: Uuid::new_v4(),
            name,
        };
        self.repo.create(&category).await?;
        Ok(category)
    }
}

// ── ListCategories ───────────────────────────────────────────────────────────

pub struct ListCategoriesUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> ListCategoriesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Category>, ApiError> {
        self.repo.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MockCategoryRepo {
        stored: Mutex<Vec<Category>>,
    }

    impl CategoryRepository for MockCategoryRepo {
        async fn create(&self, category: &Category) -> Result<(), ApiError> {
            self.stored.lock().unwrap().push(category.clone());
            Ok(())
        }
        async fn list(&self) -> Result<Vec<Category>, ApiError> {
            Ok(self.stored.lock().unwrap().clone())
        }
    }

    #[tokio::test]
    async fn should_create_and_list_categories() {
        let repo = MockCategoryRepo {
            stored: Mutex::new(vec![]),
        };
        let create = CreateCategoryUseCase { repo };
        let category = create.execute("Backend".into()).await.unwrap();
        assert_eq!(category.name, "Backend");

        let list = ListCategoriesUseCase { repo: create.repo };
        let all = list.execute().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Backend");
    }

    #[tokio::test]
    async fn should_reject_blank_name() {
        let create = CreateCategoryUseCase {
            repo: MockCategoryRepo {
                stored: Mutex::new(vec![]),
            },
        };
        let err = create.execute("  ".into()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
