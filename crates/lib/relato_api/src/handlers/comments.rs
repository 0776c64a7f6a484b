//! Comment request handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use relato_core::models::comment::Comment;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::services;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

fn validate(body: &CommentRequest) -> AppResult<()> {
    if body.content.trim().is_empty() {
        return Err(AppError::Validation("Content must not be empty".into()));
    }
    Ok(())
}

/// `POST /api/blogs/{id}/comments` — comment on a blog as the
/// authenticated user.
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(blog_id): Path<i64>,
    Json(body): Json<CommentRequest>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    validate(&body)?;
    let comment = services::comments::create(&state.pool, &user, blog_id, &body.content).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// `GET /api/blogs/{id}/comments`
pub async fn list_by_blog(
    State(state): State<AppState>,
    Path(blog_id): Path<i64>,
) -> AppResult<Json<Vec<Comment>>> {
    services::comments::list_by_blog(&state.pool, blog_id)
        .await
        .map(Json)
}

/// `PUT /api/comments/{id}` — comment author or admin only.
pub async fn update_comment(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(body): Json<CommentRequest>,
) -> AppResult<Json<Comment>> {
    validate(&body)?;
    services::comments::update(&state.pool, &user, id, &body.content)
        .await
        .map(Json)
}

/// `DELETE /api/comments/{id}` — comment author or admin only.
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    services::comments::delete(&state.pool, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
