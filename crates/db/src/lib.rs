pub mod models;
pub mod postgres;
pub mod repositories;
pub mod repository;
pub mod schema;

pub mod mock;

use eyre::Result;
use schooltime_core::errors::SchoolError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// The error a store reports when a write would break a unique constraint.
pub fn unique_violation(constraint: &str) -> SchoolError {
    SchoolError::Conflict(format!("Duplicate value violates {constraint}"))
}
