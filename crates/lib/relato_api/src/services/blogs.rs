//! Blog management flows with ownership enforcement.

use sqlx::PgPool;

use relato_core::auth::access::{self, AccessDecision};
use relato_core::models::blog::Blog;
use relato_core::models::user::Identity;
use relato_core::store;

use crate::error::{AppError, AppResult};

pub async fn create(
    pool: &PgPool,
    identity: &Identity,
    title: &str,
    content: &str,
) -> AppResult<Blog> {
    Ok(store::blogs::create_blog(pool, title, content, identity.id).await?)
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<Blog> {
    store::blogs::find_blog(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("blog not found".into()))
}

pub async fn list(pool: &PgPool) -> AppResult<Vec<Blog>> {
    Ok(store::blogs::list_blogs(pool).await?)
}

pub async fn list_by_author(pool: &PgPool, author_id: i64) -> AppResult<Vec<Blog>> {
    if store::users::find_identity(pool, author_id).await?.is_none() {
        return Err(AppError::NotFound("author not found".into()));
    }
    Ok(store::blogs::list_blogs_by_author(pool, author_id).await?)
}

/// Update a blog. Only the author or an admin may edit; the ownership fact
/// is loaded here and handed to the decision engine.
pub async fn update(
    pool: &PgPool,
    identity: &Identity,
    id: i64,
    title: &str,
    content: &str,
) -> AppResult<Blog> {
    let blog = get(pool, id).await?;
    if let AccessDecision::Deny(reason) =
        access::require_owner_or_admin(Some(identity), blog.author_id)
    {
        return Err(reason.into());
    }

    store::blogs::update_blog(pool, id, title, content)
        .await?
        .ok_or_else(|| AppError::NotFound("blog not found".into()))
}

/// Delete a blog. Only the author or an admin.
pub async fn delete(pool: &PgPool, identity: &Identity, id: i64) -> AppResult<()> {
    let blog = get(pool, id).await?;
    if let AccessDecision::Deny(reason) =
        access::require_owner_or_admin(Some(identity), blog.author_id)
    {
        return Err(reason.into());
    }

    if !store::blogs::delete_blog(pool, id).await? {
        return Err(AppError::NotFound("blog not found".into()));
    }
    Ok(())
}
