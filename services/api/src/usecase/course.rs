use uuid::Uuid;

use crate::domain::repository::CourseRepository;
use crate::domain::types::{Course, CourseUpdate, CourseView};
use crate::error::ApiError;

// ── CreateCourse ─────────────────────────────────────────────────────────────

pub struct CreateCourseInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: i32,
    pub init_date: String,
    pub capacity: i32,
    pub state: bool,
    pub image: Option<String>,
    pub category_id: Uuid,
}

pub struct CreateCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> CreateCourseUseCase<R> {
    pub async fn execute(&self, input: CreateCourseInput) -> Result<Course, ApiError> {
        if input.name.trim().is_empty() {
            return Err(ApiError::Validation("course name is required".into()));
        }
        let course = Course {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            price: input.price,
            duration: input.duration,
            init_date: input.init_date,
            capacity: input.capacity,
            state: input.state,
            image: input.image.unwrap_or_default(),
            category_id: input.category_id,
        };
        self.repo.create(&course).await?;
        Ok(course)
    }
}

// ── ListCourses ──────────────────────────────────────────────────────────────

pub struct ListCoursesUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> ListCoursesUseCase<R> {
    pub async fn execute(&self, filter: Option<String>) -> Result<Vec<CourseView>, ApiError> {
        self.repo.list(filter.as_deref().unwrap_or("")).await
    }
}

// ── GetCourse ────────────────────────────────────────────────────────────────

pub struct GetCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> GetCourseUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<CourseView, ApiError> {
        self.repo
            .find_view_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("course"))
    }
}

// ── UpdateCourse ─────────────────────────────────────────────────────────────

pub struct UpdateCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> UpdateCourseUseCase<R> {
    pub async fn execute(&self, id: Uuid, update: CourseUpdate) -> Result<CourseView, ApiError> {
        self.repo.update(id, &update).await?;
        self.repo
            .find_view_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("course"))
    }
}

// ── DeleteCourse ─────────────────────────────────────────────────────────────

pub struct DeleteCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> DeleteCourseUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        self.repo.soft_delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MockCourseRepo {
        courses: Mutex<Vec<CourseView>>,
    }

    impl MockCourseRepo {
        fn with(courses: Vec<CourseView>) -> Self {
            Self {
                courses: Mutex::new(courses),
            }
        }
    }

    fn view(name: &str, category: &str, avg: f64) -> CourseView {
        CourseView {
            id: Uuid::new_v4(),
            name: name.into(),
            description: "intro".into(),
            price: 10.0,
            duration: 8,
            init_date: "2025-01-01".into(),
            capacity: 30,
            state: true,
            image: "img".into(),
            category_id: Uuid::new_v4(),
            category_name: category.into(),
            rating_avg: avg,
        }
    }

    impl CourseRepository for MockCourseRepo {
        async fn create(&self, course: &Course) -> Result<(), ApiError> {
            self.courses.lock().unwrap().push(CourseView {
                id: course.id,
                name: course.name.clone(),
                description: course.description.clone(),
                price: course.price,
                duration: course.duration,
                init_date: course.init_date.clone(),
                capacity: course.capacity,
                state: course.state,
                image: course.image.clone(),
                category_id: course.category_id,
                category_name: String::new(),
                rating_avg: 0.0,
            });
            Ok(())
        }
        async fn list(&self, filter: &str) -> Result<Vec<CourseView>, ApiError> {
            let needle = filter.to_lowercase();
            Ok(self
                .courses
                .lock()
                .unwrap()
                .iter()
                .filter(|c| {
                    needle.is_empty()
                        || c.name.to_lowercase().contains(&needle)
                        || c.description.to_lowercase().contains(&needle)
                        || c.category_name.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect())
        }
        async fn find_view_by_id(&self, id: Uuid) -> Result<Option<CourseView>, ApiError> {
            Ok(self
                .courses
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == id)
                .cloned())
        }
        async fn update(&self, id: Uuid, update: &CourseUpdate) -> Result<(), ApiError> {
            let mut courses = self.courses.lock().unwrap();
            if let Some(c) = courses.iter_mut().find(|c| c.id == id) {
                if let Some(ref name) = update.name {
                    c.name = name.clone();
                }
                if let Some(price) = update.price {
                    c.price = price;
                }
            }
            Ok(())
        }
        async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError> {
            self.courses.lock().unwrap().retain(|c| c.id != id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn should_list_all_with_empty_filter() {
        let usecase = ListCoursesUseCase {
            repo: MockCourseRepo::with(vec![view("Golang", "Backend", 4.0)]),
        };
        let all = usecase.execute(None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].category_name, "Backend");
        assert_eq!(all[0].rating_avg, 4.0);
    }

    #[tokio::test]
    async fn should_filter_case_insensitively() {
        let usecase = ListCoursesUseCase {
            repo: MockCourseRepo::with(vec![
                view("Golang", "Backend", 4.0),
                view("Watercolors", "Art", 3.0),
            ]),
        };
        let hits = usecase.execute(Some("BACK".into())).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Golang");
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_course() {
        let usecase = GetCourseUseCase {
            repo: MockCourseRepo::with(vec![]),
        };
        let err = usecase.execute(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn should_reject_blank_course_name() {
        let usecase = CreateCourseUseCase {
            repo: MockCourseRepo::with(vec![]),
        };
        let err = usecase
            .execute(CreateCourseInput {
                name: "".into(),
                description: "x".into(),
                price: 1.0,
                duration: 1,
                init_date: "2025-01-01".into(),
                capacity: 1,
                state: false,
                image: None,
                category_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn should_update_and_return_refreshed_view() {
        let existing = view("Golang", "Backend", 4.0);
        let id = existing.id;
        let usecase = UpdateCourseUseCase {
            repo: MockCourseRepo::with(vec![existing]),
        };
        let updated = usecase
            .execute(
                id,
                CourseUpdate {
                    name: Some("Golang Advanced".into()),
                    price: Some(20.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Golang Advanced");
        assert_eq!(updated.price, 20.0);
    }
}
