//! Postgres persistence for the gift-exchange service.
//!
//! Models are `FromRow` structs, repositories are zero-sized structs with
//! async methods taking `&PgPool`, and [`draw_store::PgDrawStore`] is the
//! transactional implementation of the core's draw-store seam.

use sqlx::postgres::PgPoolOptions;

pub mod draw_store;
pub mod models;
pub mod repositories;

pub use draw_store::PgDrawStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply embedded migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
