//! Rendering engine effects as Telegram messages.

use async_trait::async_trait;
use dashmap::DashMap;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId};
use tracing::debug;

use crate::engine::event::{ChoiceOption, Effect};
use crate::error::Result;
use crate::port::outbox::Outbox;

/// [`Outbox`] implementation over the Telegram Bot API.
///
/// Tracks the last choice prompt per chat so the wizard advances by editing
/// that message in place, and `AckChoices` resolves it by replacing its text
/// (which also drops the inline keyboard).
pub struct TelegramOutbox {
    bot: Bot,
    /// Last unresolved choice-prompt message per chat. At most one entry
    /// per chat that has ever seen a prompt; `AckChoices` removes the
    /// entry, so the map is bounded by total distinct chats.
    prompts: DashMap<i64, MessageId>,
}

impl TelegramOutbox {
    /// Create an outbox sending through the given bot.
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self {
            bot,
            prompts: DashMap::new(),
        }
    }

    fn keyboard(options: &[ChoiceOption]) -> InlineKeyboardMarkup {
        InlineKeyboardMarkup::new(
            options
                .iter()
                .map(|o| vec![InlineKeyboardButton::callback(o.label.clone(), o.token.clone())]),
        )
    }

    async fn send_choices(
        &self,
        chat: ChatId,
        prompt: String,
        options: Vec<ChoiceOption>,
    ) -> Result<()> {
        let markup = Self::keyboard(&options);

        // Advance the wizard by editing the previous prompt when there is
        // one; stale or deleted messages fall back to a fresh send.
        if let Some(existing) = self.prompts.get(&chat.0).map(|id| *id) {
            let edited = self
                .bot
                .edit_message_text(chat, existing, &prompt)
                .reply_markup(markup.clone())
                .await;
            if edited.is_ok() {
                return Ok(());
            }
            debug!(chat = chat.0, "Prompt edit failed, sending a new message");
            self.prompts.remove(&chat.0);
        }

        let sent = self
            .bot
            .send_message(chat, prompt)
            .reply_markup(markup)
            .await?;
        self.prompts.insert(chat.0, sent.id);
        Ok(())
    }

    async fn ack_choices(&self, chat: ChatId, text: String) -> Result<()> {
        if let Some((_, existing)) = self.prompts.remove(&chat.0) {
            if self
                .bot
                .edit_message_text(chat, existing, &text)
                .await
                .is_ok()
            {
                return Ok(());
            }
            debug!(chat = chat.0, "Ack edit failed, sending a new message");
        }
        self.bot.send_message(chat, text).await?;
        Ok(())
    }
}

#[async_trait]
impl Outbox for TelegramOutbox {
    async fn deliver(&self, effect: Effect) -> Result<()> {
        let chat = ChatId(effect.user().value());
        match effect {
            Effect::SendText { text, .. } => {
                self.bot.send_message(chat, text).await?;
                Ok(())
            }
            Effect::SendChoices {
                prompt, options, ..
            } => self.send_choices(chat, prompt, options).await,
            Effect::AckChoices { text, .. } => self.ack_choices(chat, text).await,
        }
    }
}
