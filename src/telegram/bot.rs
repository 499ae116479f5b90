//! Bot construction and the command menu

use reqwest::ClientBuilder;
use secrecy::{ExposeSecret, SecretString};
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;

use crate::core::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Send me a YouTube link and pick a format. Commands:")]
pub enum Command {
    #[command(description = "how to use the bot")]
    Start,
    #[command(description = "show this help")]
    Help,
    #[command(description = "downloads used today")]
    Usage,
}

/// Creates a Bot instance with custom or default API URL
///
/// Uses `BOT_API_URL` when set, so a local Bot API server can lift the
/// upload size limit.
pub fn create_bot(token: &SecretString) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(token.expose_secret().to_string(), client);

    let bot = match config::bot_api::get_url() {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(&bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
            bot.set_api_url(url)
        }
        None => bot,
    };

    Ok(bot)
}

/// Registers the command menu shown in Telegram clients.
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = Command::bot_commands();
    bot.set_my_commands(commands).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_descriptions() {
        let text = Command::descriptions().to_string();
        assert!(text.contains("YouTube link"));
        assert!(text.contains("/start"));
        assert!(text.contains("/usage"));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/usage", "tubegate_bot").unwrap(), Command::Usage);
        assert_eq!(Command::parse("/start", "tubegate_bot").unwrap(), Command::Start);
        assert!(Command::parse("/history", "tubegate_bot").is_err());
    }
}
