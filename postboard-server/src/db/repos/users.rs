//! User repository
//!
//! - create: INSERT ... RETURNING, UNIQUE violations surface as Conflict
//! - delete_with_posts: explicit cascade inside one transaction

use sqlx::{FromRow, SqlitePool};

use crate::models::{Email, PasswordHash, Username};
use super::DbError;

/// User record from database (public fields only; the password hash is never read back)
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user.
    ///
    /// Fails with `DbError::Conflict` when the username or email is taken.
    pub async fn create(
        &self,
        username: &Username,
        email: &Email,
        password: &PasswordHash,
    ) -> Result<User, DbError> {
        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (username, email, password)
            VALUES (?, ?, ?)
            RETURNING id, username, email
            "#,
        )
        .bind(username.as_str())
        .bind(email.as_str())
        .bind(password.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::from_write(e, "user"))?;

        tracing::debug!(user_id = user.id, "created user");
        Ok(user)
    }

    /// List every user, oldest first.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as("SELECT id, username, email FROM users ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    /// Overwrite a user's email.
    pub async fn update_email(&self, id: i64, email: &Email) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE users SET email = ? WHERE id = ?")
            .bind(email.as_str())
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::from_write(e, "user"))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("user", id));
        }
        Ok(())
    }

    /// Delete a user and every post they own (atomic).
    ///
    /// Returns the number of posts removed alongside the user.
    pub async fn delete_with_posts(&self, id: i64) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;

        let posts = sqlx::query("DELETE FROM posts WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let users = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        // Dropping the transaction rolls back the post deletion
        if users == 0 {
            return Err(DbError::not_found("user", id));
        }

        tx.commit().await?;
        tracing::debug!(user_id = id, posts, "deleted user with posts");
        Ok(posts)
    }
}
