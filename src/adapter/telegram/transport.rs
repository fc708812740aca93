//! Inbound Telegram update handling.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{info, warn};

use crate::domain::user::UserId;
use crate::engine::event::{bot_commands, parse_command, Choice, CommandParseError, EventKind};
use crate::engine::router::SessionRouter;
use crate::error::Result;

/// Run the Telegram update dispatcher until shutdown.
///
/// Every update is decoded into an abstract event here, at the boundary;
/// the router and engine never see Telegram types.
pub async fn run_dispatcher(bot: Bot, router: Arc<SessionRouter>) -> Result<()> {
    // Register commands with Telegram so they appear in the "/" menu.
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    info!("Telegram dispatcher starting");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![router])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Telegram dispatcher stopped");
    Ok(())
}

async fn handle_message(msg: Message, router: Arc<SessionRouter>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let user = UserId::new(msg.chat.id.0);
    let event = match parse_command(text) {
        Ok(cmd) => EventKind::Command(cmd),
        Err(CommandParseError::NotACommand) => EventKind::Text(text.to_string()),
        Err(CommandParseError::UnknownCommand(raw)) => EventKind::UnknownCommand(raw),
    };

    router.dispatch(user, event).await;
    Ok(())
}

async fn handle_callback(
    bot: Bot,
    query: CallbackQuery,
    router: Arc<SessionRouter>,
) -> ResponseResult<()> {
    // Stop the client-side spinner regardless of what the data decodes to.
    bot.answer_callback_query(query.id.clone()).await?;

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };

    let user = match query.message.as_ref() {
        Some(message) => UserId::new(message.chat().id.0),
        None => UserId::new(i64::try_from(query.from.id.0).unwrap_or_default()),
    };

    let event = match Choice::decode(data) {
        Some(choice) => EventKind::Choice(choice),
        None => EventKind::UnknownChoice(data.to_string()),
    };

    router.dispatch(user, event).await;
    Ok(())
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> std::result::Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
