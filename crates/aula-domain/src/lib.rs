//! Shared domain types for the aula platform.

pub mod role;
