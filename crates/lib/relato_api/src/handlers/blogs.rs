//! Blog request handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use relato_core::models::blog::Blog;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::services;

#[derive(Debug, Deserialize)]
pub struct BlogRequest {
    pub title: String,
    pub content: String,
}

fn validate(body: &BlogRequest) -> AppResult<()> {
    if body.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".into()));
    }
    if body.content.trim().is_empty() {
        return Err(AppError::Validation("Content must not be empty".into()));
    }
    Ok(())
}

/// `POST /api/blogs` — create a blog owned by the authenticated user.
pub async fn create_blog(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<BlogRequest>,
) -> AppResult<(StatusCode, Json<Blog>)> {
    validate(&body)?;
    let blog = services::blogs::create(&state.pool, &user, &body.title, &body.content).await?;
    Ok((StatusCode::CREATED, Json(blog)))
}

/// `GET /api/blogs/{id}`
pub async fn get_blog(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Blog>> {
    services::blogs::get(&state.pool, id).await.map(Json)
}

/// `GET /api/blogs`
pub async fn list_blogs(State(state): State<AppState>) -> AppResult<Json<Vec<Blog>>> {
    services::blogs::list(&state.pool).await.map(Json)
}

/// `GET /api/blogs/author/{author_id}`
pub async fn list_by_author(
    State(state): State<AppState>,
    Path(author_id): Path<i64>,
) -> AppResult<Json<Vec<Blog>>> {
    services::blogs::list_by_author(&state.pool, author_id)
        .await
        .map(Json)
}

/// `PUT /api/blogs/{id}` — author or admin only.
pub async fn update_blog(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(body): Json<BlogRequest>,
) -> AppResult<Json<Blog>> {
    validate(&body)?;
    services::blogs::update(&state.pool, &user, id, &body.title, &body.content)
        .await
        .map(Json)
}

/// `DELETE /api/blogs/{id}` — author or admin only.
pub async fn delete_blog(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    services::blogs::delete(&state.pool, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
