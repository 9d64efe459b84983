//! Postgres persistence for the booking engine.
//!
//! `repositories` implements the ports defined in `slotwise-core`,
//! `schema` bootstraps the tables including the no-overlap exclusion
//! constraint, and `mock` holds the in-memory and mockall test doubles.

pub mod mock;
pub mod models;
pub mod repositories;
pub mod schema;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

const MAX_CONNECTIONS: u32 = 10;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await?;

    Ok(pool)
}
