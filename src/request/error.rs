use thiserror::Error;

use crate::download::{DownloadError, MetadataError};

/// A chat operation (send, edit, upload) failed.
#[derive(Debug, Error)]
#[error("delivery failed: {message}")]
pub struct DeliveryError {
    pub message: String,
}

impl DeliveryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<teloxide::RequestError> for DeliveryError {
    fn from(err: teloxide::RequestError) -> Self {
        DeliveryError::new(err.to_string())
    }
}

/// Every way a single user request can end early.
///
/// All variants are terminal for the request and are reported to the user
/// through [`user_message`](Self::user_message); none of them stop the bot.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Malformed, unknown, expired or foreign selection payload
    #[error("invalid request: {0}")]
    Validation(String),

    /// The user used up the daily quota
    #[error("daily quota exceeded ({used}/{max})")]
    QuotaExceeded { used: u32, max: u32 },

    #[error("metadata lookup failed: {0}")]
    Metadata(#[from] MetadataError),

    /// Media longer than the longest permitted duration
    #[error("duration {duration_secs}s exceeds limit of {limit_secs}s")]
    DurationLimit { duration_secs: u64, limit_secs: u64 },

    #[error("download failed: {0}")]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl RequestError {
    /// Short category name for logs
    pub fn category(&self) -> &'static str {
        match self {
            RequestError::Validation(_) => "validation",
            RequestError::QuotaExceeded { .. } => "quota",
            RequestError::Metadata(_) => "metadata",
            RequestError::DurationLimit { .. } => "duration",
            RequestError::Download(_) => "download",
            RequestError::Delivery(_) => "delivery",
        }
    }

    /// Text shown to the user. Never includes tool output or command lines.
    pub fn user_message(&self) -> String {
        match self {
            RequestError::Validation(_) => {
                "⚠️ This request is no longer valid. Please send the link again.".to_string()
            }
            RequestError::QuotaExceeded { max, .. } => format!(
                "🚫 You have reached your daily limit of {} downloads. Please try again later.",
                max
            ),
            RequestError::Metadata(_) => {
                "❌ Could not get information about this video. Please check the link and try again.".to_string()
            }
            RequestError::DurationLimit { limit_secs, .. } => format!(
                "⏱ Sorry, videos longer than {} minutes are not supported.",
                limit_secs / 60
            ),
            RequestError::Download(_) | RequestError::Delivery(_) => {
                "❌ Something went wrong while downloading. Please try again later.".to_string()
            }
        }
    }
}
