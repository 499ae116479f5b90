//! Telegram bot handler tree configuration
//!
//! The dispatcher schema is built from [`HandlerDeps`] so integration tests
//! can use the same handler tree as production code.

mod schema;
mod types;

pub use schema::schema;
pub use types::{request_context, HandlerDeps, HandlerError};
