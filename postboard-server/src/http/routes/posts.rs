//! Post endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{PostRepo, PostWithAuthor};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery, ValidId};
use crate::http::server::AppState;
use crate::models::{PostContent, PostTitle};
use super::users::UserResponse;
use super::MessageResponse;

/// Create post request
#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

/// Id of a freshly created post
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedPostResponse {
    pub id: i64,
}

/// Post with its owner's public fields
#[derive(Debug, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user: UserResponse,
}

impl From<PostWithAuthor> for PostResponse {
    fn from(p: PostWithAuthor) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            user: UserResponse::from(p.author),
        }
    }
}

/// Query string for PUT /posts/{id}/content/
#[derive(Deserialize)]
pub struct ContentParams {
    pub content: String,
}

/// POST /posts/ - create a post
async fn create_post(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatedPostResponse>), ApiError> {
    let title = PostTitle::new(&req.title)?;
    let content = PostContent::new(&req.content)?;

    let id = PostRepo::new(&state.pool)
        .create(&title, &content, req.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedPostResponse { id })))
}

/// GET /posts/ - list all posts with authors
async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = PostRepo::new(&state.pool).list_with_authors().await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /users/{id}/posts/ - list one user's posts
async fn list_user_posts(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = PostRepo::new(&state.pool).list_for_user(user_id).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// PUT /posts/{id}/content/?content=... - replace a post's content
async fn update_content(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ApiQuery(params): ApiQuery<ContentParams>,
) -> Result<Json<MessageResponse>, ApiError> {
    let content = PostContent::new(&params.content)?;
    PostRepo::new(&state.pool).update_content(id, &content).await?;

    Ok(Json(MessageResponse::new("Post content updated")))
}

/// DELETE /posts/{id}/ - delete a post
async fn delete_post(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MessageResponse>, ApiError> {
    PostRepo::new(&state.pool).delete(id).await?;
    Ok(Json(MessageResponse::new("Post deleted")))
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts/", get(list_posts).post(create_post))
        .route("/posts/{id}/", delete(delete_post))
        .route("/posts/{id}/content/", put(update_content))
        .route("/users/{id}/posts/", get(list_user_posts))
}
