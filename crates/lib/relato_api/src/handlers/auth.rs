//! Authentication request handlers.

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use relato_core::models::user::Identity;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::handlers::MIN_PASSWORD_LEN;
use crate::middleware::auth::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
}

/// `POST /api/auth/login` — authenticate with username + password.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state.auth.login(&body.username, &body.password).await?;
    Ok(Json(LoginResponse { token, user }))
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// `PUT /api/auth/change-password` — change the authenticated user's
/// password after verifying the old one.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    if body.new_password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    state
        .auth
        .change_password(user.id, &body.old_password, &body.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/auth/profile` — the authenticated user's identity.
pub async fn profile(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<Identity> {
    Json(user)
}
