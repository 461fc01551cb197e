use std::sync::Arc;

use secretary_kit::{
    markdown::{MarkdownString, MarkdownStringMessage},
    markdown_format,
};
use teloxide::{
    prelude::*,
    utils::command::{BotCommands, ParseError},
};

use crate::{
    commands::{Command, command_help::CommandHelp, command_trait::CommandTrait, execute_command},
    context::AppContext,
    error::CommandError,
};

/// Handle text messages: commands get a reply, anything else is ignored
pub async fn handle_text_message(
    bot: Bot,
    msg: Message,
    context: Arc<AppContext>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    // Get bot username for filtering
    let bot_name = bot
        .get_me()
        .await
        .ok()
        .map(|me| me.username().to_string())
        .unwrap_or_default();

    if let Some(reply) = process_text(&context, msg.chat.id, text, &bot_name).await {
        bot.send_markdown_message(msg.chat.id, reply).await?;
    }
    Ok(())
}

/// Parse and run one command, returning the reply to send back (if any)
pub async fn process_text(
    context: &AppContext,
    chat_id: ChatId,
    text: &str,
    bot_name: &str,
) -> Option<MarkdownString> {
    if !text.trim_start().starts_with('/') {
        return None;
    }

    let cmd = match Command::parse(text.trim(), bot_name) {
        Ok(cmd) => cmd,
        Err(ParseError::WrongBotName(name)) => {
            log::debug!("Ignoring command addressed to {} in chat {}", name, chat_id);
            return None;
        }
        Err(err) => {
            log::warn!("Parse error in chat {}: {}", chat_id, err);
            return Some(markdown_format!(
                "🤷 Command not recognized\\. Try {}",
                CommandHelp.to_command_string(false)
            ));
        }
    };

    log::info!("Chat {}: {}", chat_id, cmd);
    let usage = cmd.usage();
    match execute_command(context, cmd).await {
        Ok(reply) => Some(reply),
        Err(err) => Some(report_error(chat_id, &usage, err)),
    }
}

fn report_error(chat_id: ChatId, usage: &str, err: CommandError) -> MarkdownString {
    if err.is_internal() {
        log::error!("Command failed in chat {}: {}", chat_id, err);
    } else {
        log::warn!("Command rejected in chat {}: {}", chat_id, err);
    }
    match err {
        CommandError::Argument(_) => {
            err.user_message() + markdown_format!("\nUsage: `{}`", usage)
        }
        _ => err.user_message(),
    }
}
