//! Comment management flows with ownership enforcement.

use sqlx::PgPool;

use relato_core::auth::access::{self, AccessDecision};
use relato_core::models::comment::Comment;
use relato_core::models::user::Identity;
use relato_core::store;

use crate::error::{AppError, AppResult};

/// Create a comment on a blog. The blog must exist.
pub async fn create(
    pool: &PgPool,
    identity: &Identity,
    blog_id: i64,
    content: &str,
) -> AppResult<Comment> {
    if store::blogs::find_blog(pool, blog_id).await?.is_none() {
        return Err(AppError::NotFound("blog not found".into()));
    }
    Ok(store::comments::create_comment(pool, blog_id, identity.id, content).await?)
}

pub async fn list_by_blog(pool: &PgPool, blog_id: i64) -> AppResult<Vec<Comment>> {
    if store::blogs::find_blog(pool, blog_id).await?.is_none() {
        return Err(AppError::NotFound("blog not found".into()));
    }
    Ok(store::comments::list_comments_by_blog(pool, blog_id).await?)
}

/// Update a comment. Only its author or an admin.
pub async fn update(
    pool: &PgPool,
    identity: &Identity,
    id: i64,
    content: &str,
) -> AppResult<Comment> {
    let comment = store::comments::find_comment(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("comment not found".into()))?;

    if let AccessDecision::Deny(reason) =
        access::require_owner_or_admin(Some(identity), comment.user_id)
    {
        return Err(reason.into());
    }

    store::comments::update_comment(pool, id, content)
        .await?
        .ok_or_else(|| AppError::NotFound("comment not found".into()))
}

/// Delete a comment. Only its author or an admin.
pub async fn delete(pool: &PgPool, identity: &Identity, id: i64) -> AppResult<()> {
    let comment = store::comments::find_comment(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("comment not found".into()))?;

    if let AccessDecision::Deny(reason) =
        access::require_owner_or_admin(Some(identity), comment.user_id)
    {
        return Err(reason.into());
    }

    if !store::comments::delete_comment(pool, id).await? {
        return Err(AppError::NotFound("comment not found".into()));
    }
    Ok(())
}
