//! App orchestration module.
//!
//! Wires the profile store, oracles, conversation engine, and session router
//! together and runs the Telegram transport.
//!
//! Requires the `telegram` feature.

use std::sync::Arc;

use teloxide::Bot;
use tracing::info;

use crate::adapter::oracle::{DummyExecutionOracle, DummyQuoteOracle};
use crate::adapter::sqlite::{create_pool, run_migrations, SqliteProfileStore};
use crate::adapter::telegram::{run_dispatcher, TelegramOutbox};
use crate::config::Config;
use crate::engine::router::SessionRouter;
use crate::engine::ConversationEngine;
use crate::error::{ConfigError, Result};

/// Main application struct.
pub struct App;

impl App {
    /// Run the bot until the dispatcher shuts down.
    ///
    /// This opens the profile database, runs pending migrations, builds the
    /// conversation engine, and starts the Telegram update dispatcher.
    pub async fn run(config: Config) -> Result<()> {
        let token = config
            .telegram
            .bot_token
            .clone()
            .ok_or(ConfigError::MissingField {
                field: "TELEGRAM_BOT_TOKEN",
            })?;

        let pool = create_pool(&config.database.url)?;
        run_migrations(&pool)?;
        info!(database = %config.database.url, "Profile database ready");

        let store = Arc::new(SqliteProfileStore::new(pool));
        let catalog = Arc::new(config.assets.clone());

        let quotes = Arc::new(DummyQuoteOracle::new(catalog.clone()));
        let executor = Arc::new(DummyExecutionOracle);

        let engine = Arc::new(ConversationEngine::new(store, quotes, executor, catalog));

        let bot = Bot::new(token);
        let outbox = Arc::new(TelegramOutbox::new(bot.clone()));
        let router = Arc::new(SessionRouter::new(engine, outbox));

        run_dispatcher(bot, router).await
    }
}
