//! Dispatcher schema and handler chain builders

use indoc::formatdoc;
use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;
use teloxide::utils::command::BotCommands;

use super::types::{request_context, HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::gateway::TelegramGateway;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same tree is used in production and can be fed synthetic updates in
/// tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_messages = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(message_handler(deps_messages))
        .branch(callback_handler(deps_callback))
}

fn greeting(deps: &HandlerDeps) -> String {
    let policy = deps.broker.policy();
    formatdoc!(
        "
        👋 Send a YouTube URL to get the video.

        Videos up to {full} minutes can be downloaded as video or audio, up to {audio} minutes as audio only.
        You can download {max} files per day.

        {commands}",
        full = policy.full_max_secs / 60,
        audio = policy.audio_max_secs / 60,
        max = deps.broker.quota().max_daily(),
        commands = Command::descriptions(),
    )
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

                let text = match cmd {
                    Command::Start | Command::Help => greeting(&deps),
                    Command::Usage => match msg.from.as_ref() {
                        Some(user) => deps.broker.usage_text(user.id.0),
                        None => return Ok(()),
                    },
                };

                bot.send_message(msg.chat.id, text).await?;
                Ok(())
            }
        },
    ))
}

fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let (Some(user), Some(text)) = (msg.from.as_ref(), msg.text()) else {
                    return Ok(());
                };

                let gateway = TelegramGateway::new(bot);
                let ctx = request_context(user, msg.chat.id);

                // Failures were already reported to the chat by the broker
                if let Err(e) = deps.broker.handle_text(&gateway, ctx, text).await {
                    log::debug!("Text request from user {} ended with {}", ctx.user_id, e.category());
                }
                Ok(())
            }
        })
}

fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
                log::warn!("Failed to answer callback query: {}", e);
            }

            let Some(data) = q.data.clone() else {
                return Ok(());
            };
            let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
                log::warn!("Callback from user {} without a message, ignoring", q.from.id);
                return Ok(());
            };

            let ctx = request_context(&q.from, chat_id);
            let gateway = TelegramGateway::new(bot);

            // Downloads can take minutes; keep the dispatcher free for other updates
            tokio::spawn(async move {
                match deps.broker.handle_selection(&gateway, ctx, &data).await {
                    Ok(used) => log::info!("Selection for user {} completed ({} today)", ctx.user_id, used),
                    Err(e) => log::debug!("Selection for user {} ended with {}", ctx.user_id, e.category()),
                }
            });

            Ok(())
        }
    })
}
