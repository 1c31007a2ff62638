//! User endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{User, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery, ValidId};
use crate::http::server::AppState;
use crate::models::{Email, Password, Username};
use super::MessageResponse;

/// Signup request
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Public user fields; the password never leaves the server
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
        }
    }
}

/// Query string for PUT /users/{id}/email/
#[derive(Deserialize)]
pub struct EmailParams {
    pub email: String,
}

/// POST /users/ - create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let username = Username::new(&req.username)?;
    let email = Email::new(&req.email)?;
    let password = Password::new(&req.password)?;

    // Argon2 is deliberately slow; keep it off the async workers
    let hash = tokio::task::spawn_blocking(move || password.hash())
        .await
        .map_err(|e| ApiError::Internal {
            message: format!("password hashing task failed: {}", e),
        })?
        .map_err(|e| ApiError::Internal {
            message: format!("password hashing failed: {}", e),
        })?;

    let user = UserRepo::new(&state.pool)
        .create(&username, &email, &hash)
        .await?;
    tracing::info!(user_id = user.id, username = %user.username, "user created");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/ - list all users
async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = UserRepo::new(&state.pool).list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PUT /users/{id}/email/?email=... - change a user's email
async fn update_email(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ApiQuery(params): ApiQuery<EmailParams>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = Email::new(&params.email)?;
    UserRepo::new(&state.pool).update_email(id, &email).await?;

    Ok(Json(MessageResponse::new("User email updated")))
}

/// DELETE /users/{id}/ - delete a user and all of their posts
async fn delete_user(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MessageResponse>, ApiError> {
    let posts = UserRepo::new(&state.pool).delete_with_posts(id).await?;
    tracing::info!(user_id = id, posts, "user deleted");

    Ok(Json(MessageResponse::new("User and their posts deleted")))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/", get(list_users).post(create_user))
        .route("/users/{id}/", delete(delete_user))
        .route("/users/{id}/email/", put(update_email))
}
