//! Main bot implementation: dispatcher wiring and the scheduler task.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use ordini_core::BotConfig;

use crate::error::{BotError, Result};
use crate::handlers::{handle_command, Command};
use crate::janitor;
use crate::scheduler;
use crate::state::BotState;

/// The ordini Telegram bot.
pub struct OrdiniBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Shared state across handlers.
    state: Arc<BotState>,
    /// Shutdown signal sender for the scheduler task.
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl OrdiniBot {
    /// Creates a new bot from a validated configuration.
    pub fn new(config: BotConfig) -> Result<Self> {
        let bot = Bot::new(&config.token);
        let state = Arc::new(BotState::new(bot.clone(), config)?);

        Ok(Self {
            bot,
            state,
            shutdown_tx: None,
        })
    }

    /// Creates a bot over custom shared state (for testing).
    pub fn with_state(bot: Bot, state: Arc<BotState>) -> Self {
        Self {
            bot,
            state,
            shutdown_tx: None,
        }
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| BotError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Start the bot in polling mode.
    ///
    /// Spawns the daily scheduler, performs the startup refresh, then runs
    /// the dispatcher until the process is stopped.
    pub async fn start_polling(&mut self) -> Result<()> {
        info!("Starting ordini bot in polling mode...");

        // Daily schedule: morning refresh, evening cutover.
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        self.shutdown_tx = Some(shutdown_tx);

        let scheduler_state = Arc::clone(&self.state);
        tokio::spawn(async move {
            scheduler::run(scheduler_state, shutdown_rx).await;
        });

        // Startup refresh so the gate reflects today before the first wake.
        self.state.gate.refresh(true, &self.state.announcer).await;

        let bot = self.bot.clone();
        let state_for_commands = Arc::clone(&self.state);

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let state = Arc::clone(&state_for_commands);
                        info!(chat_id = %msg.chat.id, "Command matched: {:?}", cmd);
                        async move { handle_command(bot, msg, cmd, state).await }
                    }),
            )
            .branch(
                // Anything that is not a recognized command, unknown
                // commands included, is removed from the ordering channel.
                Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
                    debug!(chat_id = %msg.chat.id, has_text = msg.text().is_some(), "Removing non-command message");
                    async move {
                        janitor::delete_chatter(&bot, &msg).await;
                        respond(())
                    }
                }),
            );

        info!("Bot is running! Send /start to begin.");

        Dispatcher::builder(bot, handler)
            .default_handler(|upd| async move {
                warn!("Unhandled update: {:?}", upd);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }

    /// Stop the scheduler task.
    pub async fn stop(&mut self) {
        info!("Stopping ordini bot...");
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }
    }
}
