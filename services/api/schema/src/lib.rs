//! sea-orm entities for the aula API database.

pub mod categories;
pub mod comments;
pub mod courses;
pub mod enrollments;
pub mod ratings;
pub mod users;
