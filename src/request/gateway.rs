//! Outbound chat surface used by the broker.

use async_trait::async_trait;
use std::path::Path;

use crate::request::error::DeliveryError;

/// One inline button: visible label plus callback payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionButton {
    pub label: String,
    pub payload: String,
}

/// Messages the broker sends back to the user.
///
/// Implemented over the Telegram Bot API in production and by recording
/// fakes in tests. Message ids are returned so status lines can be edited.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i32, DeliveryError>;

    async fn edit_text(&self, chat_id: i64, message_id: i32, text: &str) -> Result<(), DeliveryError>;

    /// Sends `text` with one button per option.
    async fn send_options(&self, chat_id: i64, text: &str, buttons: Vec<OptionButton>) -> Result<i32, DeliveryError>;

    async fn send_audio(&self, chat_id: i64, path: &Path, caption: &str) -> Result<(), DeliveryError>;

    /// Sends a video as a document so the container is not re-encoded.
    async fn send_document(&self, chat_id: i64, path: &Path, caption: &str) -> Result<(), DeliveryError>;
}
