use anyhow::Result;
use teloxide::utils::command::BotCommands;

use super::Command;
use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::flows::registration;
use crate::bot::reply::Reply;
use crate::database::models::User;

/// Greets a registered user by name; anyone else is asked for a name.
pub async fn start(engine: &ConversationEngine, inbound: &Inbound) -> Result<Reply> {
    let user = User::find_by_telegram_id(&engine.db.pool, inbound.identity).await?;

    match user.filter(User::is_registered) {
        Some(user) => Ok(Reply::info(format!(
            "С возвращением, {}! Список команд: /help",
            user.display_name()
        ))
        .remove_keyboard()),
        None => Ok(engine.begin(inbound.identity, registration::begin()).await),
    }
}

pub async fn rename(engine: &ConversationEngine, inbound: &Inbound) -> Reply {
    engine.begin(inbound.identity, registration::begin()).await
}

pub fn help() -> Reply {
    Reply::plain(Command::descriptions().to_string())
}
