use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Courses::Table)
                    .col(Courses::CategoryId)
                    .name("idx_courses_category_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Comments::Table)
                    .col(Comments::CourseId)
                    .name("idx_comments_course_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Ratings::Table)
                    .col(Ratings::CourseId)
                    .name("idx_ratings_course_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_ratings_course_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_comments_course_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_courses_category_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    CategoryId,
}

#[derive(Iden)]
enum Comments {
    Table,
    CourseId,
}

#[derive(Iden)]
enum Ratings {
    Table,
    CourseId,
}
