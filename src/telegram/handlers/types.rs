//! Handler types and dependencies

use std::sync::Arc;

use crate::request::{RequestBroker, RequestContext};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub broker: Arc<RequestBroker>,
}

impl HandlerDeps {
    pub fn new(broker: Arc<RequestBroker>) -> Self {
        Self { broker }
    }
}

/// Builds the broker context from a Telegram sender and chat.
pub fn request_context(user: &teloxide::types::User, chat_id: teloxide::types::ChatId) -> RequestContext {
    RequestContext {
        user_id: user.id.0,
        chat_id: chat_id.0,
    }
}
