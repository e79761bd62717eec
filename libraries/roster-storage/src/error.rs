/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// A unique constraint rejected the write (duplicate email).
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// The store was unreachable or no connection could be acquired in time.
    #[error("database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Any other database error from `SQLx`.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        // Classify exactly once, here, so callers match on variants
        // instead of sniffing driver error codes.
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return Self::UniqueViolation(db.message().to_string());
            }
        }

        match err {
            e @ (sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)) => {
                Self::Connection(e)
            }
            e => Self::Database(e),
        }
    }
}

impl StorageError {
    /// True when the error is a duplicate-key rejection.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }
}
