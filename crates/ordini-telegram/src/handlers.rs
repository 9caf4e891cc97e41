//! Command handlers for the ordini bot.
//!
//! Each command is a thin teloxide endpoint over a pure reply function:
//! the pure layer maps (caller, arguments, gating snapshot, store) to the
//! reply text and the store mutation, and is what the tests drive.

use std::sync::Arc;

use chrono::Local;
use ordini_models::{GatingState, Order};
use ordini_persistence::{OrderStore, PersistenceError};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info};

use crate::gate::display_date;
use crate::janitor;
use crate::state::BotState;

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Comandi disponibili:")]
pub enum Command {
    #[command(description = "data ed evento del giorno")]
    Start,

    #[command(description = "registra il tuo ordine: /ordina <cosa>")]
    Ordina(String),

    #[command(description = "lista degli ordini di oggi")]
    Lista,

    #[command(description = "cancella il tuo ordine")]
    Cancella,

    #[command(description = "svuota tutti gli ordini (admin)")]
    Clear,

    #[command(description = "elimina i messaggi recenti (admin): /clean [quanti]")]
    Clean(String),
}

/// Reply for any store failure the user can do nothing about.
const STORE_TROUBLE: &str = "⚠️ Errore interno, riprova più tardi.";

/// Dispatch a parsed command to its handler.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    match cmd {
        Command::Start => handle_start(bot, msg, state).await,
        Command::Ordina(text) => handle_ordina(bot, msg, state, text).await,
        Command::Lista => handle_lista(bot, msg, state).await,
        Command::Cancella => handle_cancella(bot, msg, state).await,
        Command::Clear => handle_clear(bot, msg, state).await,
        Command::Clean(count) => handle_clean(bot, msg, state, count).await,
    }
}

/// Handle the /start command.
pub async fn handle_start(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let snapshot = state.gate.snapshot().await;
    let today = Local::now().format("%Y-%m-%d").to_string();

    bot.send_message(msg.chat.id, start_reply(&snapshot, &today))
        .await?;

    info!(chat_id = %msg.chat.id, "User started bot");
    Ok(())
}

/// Handle the /ordina command.
pub async fn handle_ordina(
    bot: Bot,
    msg: Message,
    state: Arc<BotState>,
    text: String,
) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let user_id = user.id.0 as i64;
    let name = user.full_name();
    let snapshot = state.gate.snapshot().await;

    let reply = ordina_reply(
        &state.store,
        &snapshot,
        user_id,
        &name,
        state.is_admin(user_id),
        &text,
    );

    bot.send_message(msg.chat.id, reply).await?;

    info!(chat_id = %msg.chat.id, user_id, "Order command handled");
    Ok(())
}

/// Handle the /lista command.
pub async fn handle_lista(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, lista_reply(&state.store))
        .await?;
    Ok(())
}

/// Handle the /cancella command.
pub async fn handle_cancella(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let user_id = user.id.0 as i64;
    bot.send_message(msg.chat.id, cancella_reply(&state.store, user_id))
        .await?;

    info!(chat_id = %msg.chat.id, user_id, "Cancel command handled");
    Ok(())
}

/// Handle the /clear command (admin only).
pub async fn handle_clear(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let user_id = user.id.0 as i64;
    let reply = clear_reply(&state.store, state.is_admin(user_id));
    bot.send_message(msg.chat.id, reply).await?;

    info!(chat_id = %msg.chat.id, user_id, "Clear command handled");
    Ok(())
}

/// Handle the /clean command (admin only): best-effort bulk delete of
/// recent messages, walking backward from the command itself.
pub async fn handle_clean(
    bot: Bot,
    msg: Message,
    state: Arc<BotState>,
    count: String,
) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let user_id = user.id.0 as i64;
    if !state.is_admin(user_id) {
        bot.send_message(msg.chat.id, FORBIDDEN).await?;
        return Ok(());
    }

    let count = match clean_count(&count, state.purge_limit()) {
        Ok(count) => count,
        Err(reply) => {
            bot.send_message(msg.chat.id, reply).await?;
            return Ok(());
        }
    };

    let deleted = janitor::purge_messages(&bot, msg.chat.id, msg.id, count).await;
    bot.send_message(msg.chat.id, format!("🧽 Eliminati {} messaggi.", deleted))
        .await?;

    info!(chat_id = %msg.chat.id, user_id, deleted, "Clean command handled");
    Ok(())
}

/// Authorization failure reply, the same for every admin command.
const FORBIDDEN: &str = "❌ Non hai i permessi per questo comando.";

/// Greeting with today's date and event.
fn start_reply(gate: &GatingState, fallback_date: &str) -> String {
    let (date, title) = match &gate.event {
        Some(event) => (display_date(&event.date), event.title.as_str()),
        None => (fallback_date, "Nessun evento oggi"),
    };

    format!(
        "👋 Benvenuto nel bot degli ordini!\n\
        🗓 Data: {}\n\
        🎉 Evento del giorno: {}\n\n\
        Usa /ordina per fare un ordine 🍕",
        date, title
    )
}

/// Order submission: gate checks first, then argument validation, then the
/// duplicate check the store enforces.
///
/// A day without an event rejects everyone, admins included; a force-closed
/// day with a known event rejects non-admins only.
fn ordina_reply(
    store: &OrderStore,
    gate: &GatingState,
    user_id: i64,
    name: &str,
    is_admin: bool,
    text: &str,
) -> String {
    if !gate.has_event() {
        return "🚫 Nessun evento oggi, gli ordini non sono attivi.".to_string();
    }

    if !gate.ordering_open && !is_admin {
        return "🚫 Gli ordini sono chiusi per oggi!".to_string();
    }

    let text = text.trim();
    if text.is_empty() {
        return "Devi scrivere cosa vuoi ordinare! Es: /ordina pizza margherita".to_string();
    }

    match store.add(Order::new(user_id, name, text)) {
        Ok(()) => format!("✅ Ordine registrato per {}: {}", name, text),
        Err(PersistenceError::DuplicateOrder { .. }) => {
            "⚠️ Hai già fatto un ordine! Usa /cancella se vuoi modificarlo.".to_string()
        }
        Err(e) => {
            error!(error = %e, user_id, "Failed to save order");
            STORE_TROUBLE.to_string()
        }
    }
}

/// The order listing, in storage order.
fn lista_reply(store: &OrderStore) -> String {
    match store.load() {
        Ok(orders) if orders.is_empty() => "📭 Nessun ordine presente.".to_string(),
        Ok(orders) => {
            let lines: Vec<String> = orders.iter().map(|o| o.listing_line()).collect();
            format!("📋 Lista ordini:\n{}", lines.join("\n"))
        }
        Err(e) => {
            error!(error = %e, "Failed to load orders");
            STORE_TROUBLE.to_string()
        }
    }
}

/// Cancel the caller's own order.
fn cancella_reply(store: &OrderStore, user_id: i64) -> String {
    match store.remove_by_user(user_id) {
        Ok(true) => "🗑 Il tuo ordine è stato cancellato.".to_string(),
        Ok(false) => "❌ Non hai nessun ordine da cancellare.".to_string(),
        Err(e) => {
            error!(error = %e, user_id, "Failed to remove order");
            STORE_TROUBLE.to_string()
        }
    }
}

/// Empty the whole store (admin only).
fn clear_reply(store: &OrderStore, is_admin: bool) -> String {
    if !is_admin {
        return FORBIDDEN.to_string();
    }

    match store.clear() {
        Ok(()) => "🧹 Tutti gli ordini sono stati cancellati!".to_string(),
        Err(e) => {
            error!(error = %e, "Failed to clear orders");
            STORE_TROUBLE.to_string()
        }
    }
}

/// Parse the optional `/clean` count, bounded by the configured cap.
///
/// No argument means "up to the cap"; a non-numeric argument is a
/// validation error reply.
fn clean_count(args: &str, cap: u32) -> Result<u32, String> {
    let args = args.trim();
    if args.is_empty() {
        return Ok(cap);
    }

    match args.parse::<u32>() {
        Ok(count) => Ok(count.min(cap)),
        Err(_) => Err("Numero non valido. Usa /clean oppure /clean <quanti>.".to_string()),
    }
}
