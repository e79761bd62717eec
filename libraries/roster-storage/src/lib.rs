//! Roster Storage
//!
//! PostgreSQL database layer for the Roster users service.
//!
//! This crate owns the connection pool, the idempotent schema bootstrap,
//! and the `users` table queries.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each resource owns its own queries and model
//! - **Typed failures**: unique-constraint violations surface as a
//!   dedicated [`StorageError`] variant, so callers never inspect driver
//!   error codes
//!
//! # Example
//!
//! ```rust,no_run
//! use roster_storage::{create_pool, init_schema, users, PoolSettings};
//!
//! # async fn example() -> Result<(), roster_storage::StorageError> {
//! let pool = create_pool(&PoolSettings::default());
//! init_schema(&pool).await?;
//!
//! let all = users::list(&pool).await?;
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod users;

pub use error::StorageError;
// Handlers hold the pool without needing a direct sqlx dependency.
pub use sqlx::PgPool;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::time::Duration;

/// Connection and pool sizing settings.
///
/// Defaults mirror the documented environment defaults of the service.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub idle_timeout: Duration,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "users_db".to_string(),
            user: "postgres".to_string(),
            password: "password".to_string(),
            max_connections: 20,
            idle_timeout: Duration::from_secs(30),
            acquire_timeout: Duration::from_secs(2),
        }
    }
}

/// Create a new PostgreSQL pool.
///
/// The pool connects lazily: no connection is attempted until the first
/// query, so the process can start (and report liveness) with the store
/// down. Acquisition failures surface on the query that triggered them.
pub fn create_pool(settings: &PoolSettings) -> PgPool {
    let options = PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .database(&settings.database)
        .username(&settings.user)
        .password(&settings.password);

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .idle_timeout(settings.idle_timeout)
        .acquire_timeout(settings.acquire_timeout)
        .connect_lazy_with(options)
}

/// Ensure the `users` table exists.
///
/// Idempotent; meant to run once at process startup. Legacy rows are not
/// revalidated against the column constraints.
///
/// # Errors
///
/// Returns an error if the statement fails or the store is unreachable.
pub async fn init_schema(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            email VARCHAR(100) UNIQUE NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        ",
    )
    .execute(pool)
    .await?;

    tracing::info!("users table ready");
    Ok(())
}

/// Trivial probe query, used by readiness checks.
///
/// # Errors
///
/// Returns an error iff the pool cannot produce a working connection.
pub async fn ping(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
