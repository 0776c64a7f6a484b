//! User registration and admin user-management handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use relato_core::models::user::{Identity, Role};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::handlers::MIN_PASSWORD_LEN;
use crate::services;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// `POST /api/auth/register` — create an account. The role is always the
/// default; elevation goes through the admin endpoints.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Identity>)> {
    if body.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }
    if body.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let user = services::users::register(&state.pool, body.username.trim(), &body.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /api/admin/users` — list all users.
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<Identity>>> {
    services::users::list(&state.pool).await.map(Json)
}

/// `GET /api/admin/users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Identity>> {
    services::users::get(&state.pool, id).await.map(Json)
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub role: Role,
}

/// `PUT /api/admin/users/{id}` — update username and role.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateUserRequest>,
) -> AppResult<Json<Identity>> {
    if body.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }
    services::users::update(&state.pool, id, body.username.trim(), body.role)
        .await
        .map(Json)
}

/// `DELETE /api/admin/users/{id}`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    services::users::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
