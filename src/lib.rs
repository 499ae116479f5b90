//! tubegate - Telegram bot that brokers YouTube download requests
//!
//! A user sends a link, the bot checks the user's daily quota, looks up the
//! video's duration and offers the formats allowed for that length. Picking
//! one runs exactly one yt-dlp job, delivers the file and removes it again.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, the quota tracker and helpers
//! - `download`: duration gate, metadata resolver, job dispatcher, cleanup guard
//! - `request`: link detection, option tokens and the request broker
//! - `telegram`: bot setup, handlers and the Telegram chat gateway
//! - `cli`: command line interface

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod cli;
pub mod core;
pub mod download;
pub mod request;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, QuotaTracker};
pub use request::{RequestBroker, RequestError};
