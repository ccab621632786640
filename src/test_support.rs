//! Shared fixtures for unit tests

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::infrastructure::run_migrations;

/// Fresh in-memory SQLite database with the schema applied.
///
/// A single pooled connection keeps every query on the same memory database.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    run_migrations(&db).await.expect("run migrations");
    db
}
