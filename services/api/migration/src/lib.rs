use sea_orm_migration::prelude::*;

mod m20260601_000001_create_users;
mod m20260601_000002_create_categories;
mod m20260601_000003_create_courses;
mod m20260601_000004_create_comments;
mod m20260601_000005_create_ratings;
mod m20260601_000006_create_enrollments;
mod m20260601_000007_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_create_users::Migration),
            Box::new(m20260601_000002_create_categories::Migration),
            Box::new(m20260601_000003_create_courses::Migration),
            Box::new(m20260601_000004_create_comments::Migration),
            Box::new(m20260601_000005_create_ratings::Migration),
            Box::new(m20260601_000006_create_enrollments::Migration),
            Box::new(m20260601_000007_add_lookup_indexes::Migration),
        ]
    }
}
