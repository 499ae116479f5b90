//! [`ChatGateway`] over the Telegram Bot API.

use async_trait::async_trait;
use std::path::Path;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId};

use crate::request::{ChatGateway, DeliveryError, OptionButton};

#[derive(Clone)]
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// One button per row, in the given order.
pub fn options_keyboard(buttons: Vec<OptionButton>) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = buttons
        .into_iter()
        .map(|button| vec![InlineKeyboardButton::callback(button.label, button.payload)])
        .collect();
    InlineKeyboardMarkup::new(rows)
}

#[async_trait]
impl ChatGateway for TelegramGateway {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i32, DeliveryError> {
        let message = self.bot.send_message(ChatId(chat_id), text).await?;
        Ok(message.id.0)
    }

    async fn edit_text(&self, chat_id: i64, message_id: i32, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .edit_message_text(ChatId(chat_id), MessageId(message_id), text)
            .await?;
        Ok(())
    }

    async fn send_options(&self, chat_id: i64, text: &str, buttons: Vec<OptionButton>) -> Result<i32, DeliveryError> {
        let message = self
            .bot
            .send_message(ChatId(chat_id), text)
            .reply_markup(options_keyboard(buttons))
            .await?;
        Ok(message.id.0)
    }

    async fn send_audio(&self, chat_id: i64, path: &Path, caption: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_audio(ChatId(chat_id), InputFile::file(path))
            .caption(caption)
            .await?;
        Ok(())
    }

    async fn send_document(&self, chat_id: i64, path: &Path, caption: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_document(ChatId(chat_id), InputFile::file(path))
            .caption(caption)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_options_keyboard_layout() {
        let keyboard = options_keyboard(vec![
            OptionButton {
                label: "🎬 144p".into(),
                payload: "dl:video:144p:abc".into(),
            },
            OptionButton {
                label: "🎵 Audio".into(),
                payload: "dl:audio:audio:abc".into(),
            },
        ]);

        assert_eq!(keyboard.inline_keyboard.len(), 2);
        let first = &keyboard.inline_keyboard[0][0];
        assert_eq!(first.text, "🎬 144p");
        assert!(matches!(&first.kind, InlineKeyboardButtonKind::CallbackData(data) if data == "dl:video:144p:abc"));
    }
}
