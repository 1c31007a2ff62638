//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Handles uniqueness and ownership via constraints (no check-then-insert)
//! - Uses transactions for multi-step operations

pub mod users;
pub mod posts;

pub use users::{User, UserRepo};
pub use posts::{PostRepo, PostWithAuthor};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {resource} with this {field} already exists")]
    Conflict { resource: &'static str, field: String },

    #[error("post {post_id} references missing user {user_id}")]
    Dangling { post_id: i64, user_id: i64 },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Classify a write failure: UNIQUE violations become `Conflict`.
    ///
    /// SQLite reports the offending column as `UNIQUE constraint failed: table.column`.
    pub(crate) fn from_write(err: sqlx::Error, resource: &'static str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                let field = db
                    .message()
                    .rsplit('.')
                    .next()
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .unwrap_or("value")
                    .to_owned();
                Self::Conflict { resource, field }
            }
            _ => Self::Sqlx(err),
        }
    }

    /// Classify a write that references a parent row: a FOREIGN KEY failure
    /// means the parent `resource` with `parent_id` does not exist.
    pub(crate) fn from_owned_write(err: sqlx::Error, resource: &'static str, parent_id: i64) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                Self::not_found(resource, parent_id)
            }
            _ => Self::Sqlx(err),
        }
    }
}
