//! Application flows: user, blog, and comment management.
//!
//! Handlers stay thin; these functions own existence checks, authorization
//! decisions, and storage calls. Identities arrive as explicit parameters
//! from the request gate.

pub mod blogs;
pub mod comments;
pub mod users;
