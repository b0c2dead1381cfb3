//! Telegram bot.
//!
//! The bot is the chat front end of the ledger: it parses commands, calls the
//! [`engine::Engine`] with the chat id as group and renders the replies. The
//! engine is shared with the rest of the process and never owned by a chat.

use std::sync::Arc;

use engine::Engine;
use teloxide::{prelude::*, utils::command::BotCommands};

mod commands;
mod handlers;
mod parsing;
mod ui;

pub use commands::Command;

#[derive(Clone)]
pub struct ConfigParameters {
    engine: Arc<Engine>,
}

pub struct Bot {
    token: String,
    engine: Arc<Engine>,
}

impl Bot {
    pub fn new(token: &str, engine: Arc<Engine>) -> Result<Self, String> {
        let token = token.trim();
        if token.is_empty() {
            return Err("telegram token must not be empty".to_string());
        }

        Ok(Self {
            token: token.to_string(),
            engine,
        })
    }

    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
            tracing::warn!("failed to register the command list: {err}");
        }

        let parameters = ConfigParameters {
            engine: Arc::clone(&self.engine),
        };

        Dispatcher::builder(bot, handlers::schema())
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::debug!("Unhandled update: {:?}", upd.id);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default)]
pub struct BotBuilder {
    token: String,
    engine: Option<Arc<Engine>>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    /// Share an existing ledger with the bot. A fresh in-memory one is used
    /// otherwise.
    pub fn engine(mut self, engine: Arc<Engine>) -> BotBuilder {
        self.engine = Some(engine);
        self
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");
        let engine = self
            .engine
            .unwrap_or_else(|| Arc::new(Engine::builder().build()));
        Bot::new(&self.token, engine)
    }
}
