//! Telegram front-end: bot setup, update handlers and the chat gateway

pub mod bot;
pub mod gateway;
pub mod handlers;

pub use bot::{create_bot, setup_bot_commands, Command};
pub use gateway::TelegramGateway;
pub use handlers::{schema, HandlerDeps, HandlerError};
