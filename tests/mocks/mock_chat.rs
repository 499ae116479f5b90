//! Chat gateway that records everything the broker sends

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use tubegate::request::{ChatGateway, DeliveryError, OptionButton};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Text {
        chat_id: i64,
        message_id: i32,
        text: String,
    },
    Edit {
        chat_id: i64,
        message_id: i32,
        text: String,
    },
    Options {
        chat_id: i64,
        text: String,
        buttons: Vec<OptionButton>,
    },
    /// `existed` is whether the file was on disk when the upload was attempted
    Audio {
        chat_id: i64,
        path: PathBuf,
        existed: bool,
    },
    Document {
        chat_id: i64,
        path: PathBuf,
        existed: bool,
    },
}

/// Records outgoing chat operations; uploads or keyboards can be made to fail.
#[derive(Default)]
pub struct RecordingChat {
    events: Mutex<Vec<ChatEvent>>,
    next_message_id: AtomicI32,
    fail_uploads: bool,
    fail_options: bool,
}

impl RecordingChat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `send_audio` / `send_document` fails.
    pub fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    /// Every `send_options` fails.
    pub fn failing_options() -> Self {
        Self {
            fail_options: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<ChatEvent> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: ChatEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn next_id(&self) -> i32 {
        self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Buttons of the most recent option keyboard.
    pub fn last_buttons(&self) -> Vec<OptionButton> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                ChatEvent::Options { buttons, .. } => Some(buttons),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Callback payload of the button whose payload contains `needle`.
    pub fn payload_for(&self, needle: &str) -> String {
        self.last_buttons()
            .into_iter()
            .find(|button| button.payload.contains(needle))
            .map(|button| button.payload)
            .unwrap_or_else(|| panic!("no button matching {:?}", needle))
    }

    /// Text of the last sent or edited message.
    pub fn last_text(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|event| match event {
            ChatEvent::Text { text, .. } | ChatEvent::Edit { text, .. } => Some(text),
            _ => None,
        })
    }

    pub fn uploads(&self) -> Vec<ChatEvent> {
        self.events()
            .into_iter()
            .filter(|event| matches!(event, ChatEvent::Audio { .. } | ChatEvent::Document { .. }))
            .collect()
    }
}

#[async_trait]
impl ChatGateway for RecordingChat {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i32, DeliveryError> {
        let message_id = self.next_id();
        self.push(ChatEvent::Text {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        Ok(message_id)
    }

    async fn edit_text(&self, chat_id: i64, message_id: i32, text: &str) -> Result<(), DeliveryError> {
        self.push(ChatEvent::Edit {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_options(&self, chat_id: i64, text: &str, buttons: Vec<OptionButton>) -> Result<i32, DeliveryError> {
        if self.fail_options {
            return Err(DeliveryError::new("keyboard rejected"));
        }
        self.push(ChatEvent::Options {
            chat_id,
            text: text.to_string(),
            buttons,
        });
        Ok(self.next_id())
    }

    async fn send_audio(&self, chat_id: i64, path: &Path, _caption: &str) -> Result<(), DeliveryError> {
        self.push(ChatEvent::Audio {
            chat_id,
            path: path.to_path_buf(),
            existed: path.exists(),
        });
        if self.fail_uploads {
            return Err(DeliveryError::new("upload failed"));
        }
        Ok(())
    }

    async fn send_document(&self, chat_id: i64, path: &Path, _caption: &str) -> Result<(), DeliveryError> {
        self.push(ChatEvent::Document {
            chat_id,
            path: path.to_path_buf(),
            existed: path.exists(),
        });
        if self.fail_uploads {
            return Err(DeliveryError::new("upload failed"));
        }
        Ok(())
    }
}
