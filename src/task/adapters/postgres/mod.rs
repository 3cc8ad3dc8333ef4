//! `PostgreSQL` adapter for board persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskRepository, TaskPgPool, ensure_schema};
