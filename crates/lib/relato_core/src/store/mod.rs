//! SQL storage queries.
//!
//! Runtime-checked sqlx queries over PostgreSQL. Services own the flows;
//! these functions only move rows.

pub mod blogs;
pub mod comments;
pub mod users;
