//! Comment domain model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub blog_id: i64,
    pub user_id: i64,
    pub content: String,
}
