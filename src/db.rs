use chrono::{DateTime, SecondsFormat, Utc};
use diesel::{
    connection::SimpleConnection,
    prelude::*,
    r2d2::{self, ConnectionManager, PoolError},
};

use crate::types::DbPool;

pub type DbError = Box<dyn std::error::Error + Send + Sync>;

const SCHEMA: &str = include_str!("../migrations/2024-01-01-000000_create_chat/up.sql");

/// Fixed-width RFC 3339 so that string order is chronological order.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn iso_date() -> String {
    format_timestamp(Utc::now())
}

pub fn build_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder().build(manager)
}

/// Single-connection pool over an in-memory database. Every connection to
/// `:memory:` is its own database, so the pool must never open a second one.
pub fn build_memory_pool() -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), DbError> {
    conn.batch_execute(SCHEMA)?;
    Ok(())
}

pub mod comments;
pub mod messages;
pub mod rooms;
pub mod users;
