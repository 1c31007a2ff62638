//! Post repository
//!
//! - create: single INSERT; the foreign key on posts.user_id rejects unknown owners
//! - list: single LEFT JOIN against users; a post without an owner is an error

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::models::{PostContent, PostTitle};
use super::{DbError, User};

/// Post joined with its owner's public fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: User,
}

const SELECT_WITH_AUTHOR: &str = r#"
    SELECT
        p.id,
        p.title,
        p.content,
        p.user_id,
        u.id AS author_id,
        u.username AS author_username,
        u.email AS author_email
    FROM posts p
    LEFT JOIN users u ON u.id = p.user_id
"#;

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a post owned by `user_id`, returning its id.
    ///
    /// Fails with `DbError::NotFound` if the owner does not exist.
    pub async fn create(
        &self,
        title: &PostTitle,
        content: &PostContent,
        user_id: i64,
    ) -> Result<i64, DbError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO posts (title, content, user_id)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(title.as_str())
        .bind(content.as_str())
        .bind(user_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::from_owned_write(e, "user", user_id))?;

        tracing::debug!(post_id = id, user_id, "created post");
        Ok(id)
    }

    /// List every post with its author.
    pub async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, DbError> {
        let sql = format!("{SELECT_WITH_AUTHOR} ORDER BY p.id");
        let rows = sqlx::query(&sql).fetch_all(self.pool).await?;

        rows.iter().map(post_with_author).collect()
    }

    /// List posts owned by one user with the author attached.
    ///
    /// An unknown user simply has no posts.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<PostWithAuthor>, DbError> {
        let sql = format!("{SELECT_WITH_AUTHOR} WHERE p.user_id = ? ORDER BY p.id");
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        rows.iter().map(post_with_author).collect()
    }

    /// Overwrite a post's content.
    pub async fn update_content(&self, id: i64, content: &PostContent) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE posts SET content = ? WHERE id = ?")
            .bind(content.as_str())
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("post", id));
        }
        Ok(())
    }

    /// Delete a single post.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("post", id));
        }
        Ok(())
    }
}

fn post_with_author(row: &SqliteRow) -> Result<PostWithAuthor, DbError> {
    let id: i64 = row.try_get("id")?;
    let user_id: i64 = row.try_get("user_id")?;

    // LEFT JOIN leaves the author columns NULL when the owner row is gone
    let author_id: Option<i64> = row.try_get("author_id")?;
    let Some(author_id) = author_id else {
        return Err(DbError::Dangling {
            post_id: id,
            user_id,
        });
    };

    Ok(PostWithAuthor {
        id,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        author: User {
            id: author_id,
            username: row.try_get("author_username")?,
            email: row.try_get("author_email")?,
        },
    })
}
