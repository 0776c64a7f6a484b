//! # relato_api
//!
//! HTTP API library for Relato.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use axum::Router;
use axum::routing::{get, post, put};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use relato_core::auth::authenticator::Authenticator;
use relato_core::auth::token::TokenCodec;
use relato_core::store::users::PgUserDirectory;

use crate::config::ApiConfig;
use crate::handlers::{auth, blogs, comments, health, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
    /// Authenticator wired to the SQL user directory.
    pub auth: Authenticator<PgUserDirectory>,
}

impl AppState {
    /// Build state from a pool and config. The token codec takes the signing
    /// secret here, once; nothing rotates it afterwards.
    pub fn new(pool: PgPool, config: ApiConfig) -> Self {
        let codec = TokenCodec::new(config.jwt_secret.as_bytes());
        let auth = Authenticator::new(PgUserDirectory::new(pool.clone()), codec);
        Self { pool, config, auth }
    }
}

/// Run embedded database migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    relato_core::migrate::migrate(pool).await
}

/// Builds the axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Open routes (no auth at all).
    let open = Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(users::register));

    // Public reads; a valid token enriches the request, a bad one is ignored.
    let public = Router::new()
        .route("/api/blogs", get(blogs::list_blogs))
        .route("/api/blogs/{id}", get(blogs::get_blog))
        .route("/api/blogs/author/{author_id}", get(blogs::list_by_author))
        .route("/api/blogs/{id}/comments", get(comments::list_by_blog))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::optional_auth,
        ));

    // Protected routes (valid bearer token required).
    let protected = Router::new()
        .route("/api/auth/profile", get(auth::profile))
        .route("/api/auth/change-password", put(auth::change_password))
        .route("/api/blogs", post(blogs::create_blog))
        .route(
            "/api/blogs/{id}",
            put(blogs::update_blog).delete(blogs::delete_blog),
        )
        .route("/api/blogs/{id}/comments", post(comments::create_comment))
        .route(
            "/api/comments/{id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    // Admin routes: authenticate, then gate on the admin role at the
    // routing layer. Ownership checks stay in the services, where the
    // resource has already been loaded.
    let admin = Router::new()
        .route("/api/admin/users", get(users::list_users))
        .route(
            "/api/admin/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(axum::middleware::from_fn(middleware::auth::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(open)
        .merge(public)
        .merge(protected)
        .merge(admin)
        .layer(cors)
        .with_state(state)
}
