//! Comment storage queries.

use sqlx::PgPool;

use crate::models::comment::Comment;

pub async fn create_comment(
    pool: &PgPool,
    blog_id: i64,
    user_id: i64,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "INSERT INTO comments (blog_id, user_id, content) VALUES ($1, $2, $3) \
         RETURNING id, blog_id, user_id, content",
    )
    .bind(blog_id)
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

pub async fn find_comment(pool: &PgPool, id: i64) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "SELECT id, blog_id, user_id, content FROM comments WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_comments_by_blog(pool: &PgPool, blog_id: i64) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "SELECT id, blog_id, user_id, content FROM comments WHERE blog_id = $1 ORDER BY id",
    )
    .bind(blog_id)
    .fetch_all(pool)
    .await
}

pub async fn update_comment(
    pool: &PgPool,
    id: i64,
    content: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "UPDATE comments SET content = $2 WHERE id = $1 \
         RETURNING id, blog_id, user_id, content",
    )
    .bind(id)
    .bind(content)
    .fetch_optional(pool)
    .await
}

pub async fn delete_comment(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
