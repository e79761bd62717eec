//! Users table queries and row model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::error::Result;

const USER_COLUMNS: &str = "id, name, email, created_at, updated_at";

/// A row in the `users` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update: only the present fields are written.
///
/// `updated_at` is always refreshed, regardless of which fields are set.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// Get all users, newest first.
pub async fn list(pool: &PgPool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Get a user by primary key.
pub async fn get(pool: &PgPool, id: i32) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Insert a new user and return the stored row.
///
/// A duplicate email surfaces as [`crate::StorageError::UniqueViolation`];
/// the table constraint is the only uniqueness check.
pub async fn create(pool: &PgPool, name: &str, email: &str) -> Result<User> {
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
    ))
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Apply a partial update by primary key.
///
/// Builds a SET clause covering only the present fields plus a forced
/// `updated_at` refresh. Returns `None` when no row matched.
pub async fn update(pool: &PgPool, id: i32, changes: &UserChanges) -> Result<Option<User>> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET ");

    {
        let mut fields = builder.separated(", ");
        if let Some(name) = &changes.name {
            fields.push("name = ").push_bind_unseparated(name);
        }
        if let Some(email) = &changes.email {
            fields.push("email = ").push_bind_unseparated(email);
        }
        fields.push("updated_at = NOW()");
    }

    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(format!(" RETURNING {USER_COLUMNS}"));

    let user = builder
        .build_query_as::<User>()
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Delete a user by primary key, returning the removed row.
pub async fn delete(pool: &PgPool, id: i32) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
