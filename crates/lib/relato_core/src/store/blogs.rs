//! Blog storage queries.

use sqlx::PgPool;

use crate::models::blog::Blog;

pub async fn create_blog(
    pool: &PgPool,
    title: &str,
    content: &str,
    author_id: i64,
) -> Result<Blog, sqlx::Error> {
    sqlx::query_as::<_, Blog>(
        "INSERT INTO blogs (title, content, author_id) VALUES ($1, $2, $3) \
         RETURNING id, title, content, author_id",
    )
    .bind(title)
    .bind(content)
    .bind(author_id)
    .fetch_one(pool)
    .await
}

pub async fn find_blog(pool: &PgPool, id: i64) -> Result<Option<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>("SELECT id, title, content, author_id FROM blogs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_blogs(pool: &PgPool) -> Result<Vec<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>("SELECT id, title, content, author_id FROM blogs ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn list_blogs_by_author(pool: &PgPool, author_id: i64) -> Result<Vec<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(
        "SELECT id, title, content, author_id FROM blogs WHERE author_id = $1 ORDER BY id",
    )
    .bind(author_id)
    .fetch_all(pool)
    .await
}

pub async fn update_blog(
    pool: &PgPool,
    id: i64,
    title: &str,
    content: &str,
) -> Result<Option<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(
        "UPDATE blogs SET title = $2, content = $3 WHERE id = $1 \
         RETURNING id, title, content, author_id",
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .fetch_optional(pool)
    .await
}

pub async fn delete_blog(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
