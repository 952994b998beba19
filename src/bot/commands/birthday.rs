use anyhow::Result;

use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::flows::birthday::{self, parse_birthday};
use crate::bot::reply::Reply;
use crate::database::models::User;
use crate::utils::datetime::format_day_month;
use crate::utils::markdown::{bold, escape_markdown};

/// `/birthday 07.03` stores directly; a bare `/birthday` asks for the date.
pub async fn set(engine: &ConversationEngine, inbound: &Inbound, arg: &str) -> Result<Reply> {
    if arg.trim().is_empty() {
        return Ok(engine.begin(inbound.identity, birthday::begin()).await);
    }

    match parse_birthday(arg) {
        Some((day, month)) => birthday::save(engine, inbound.identity, day, month).await,
        None => Ok(Reply::warning("Неверный формат. Пример: /birthday 07.03")),
    }
}

pub async fn list(engine: &ConversationEngine) -> Result<Reply> {
    let users = User::list_birthdays(&engine.db.pool).await?;
    if users.is_empty() {
        return Ok(Reply::info("Дни рождения пока не указаны. Добавьте свой: /birthday ДД.ММ"));
    }

    let mut text = format!("🎂 {}\n", bold("Дни рождения"));
    for user in &users {
        if let Some((day, month)) = user.birthday() {
            text.push('\n');
            text.push_str(&escape_markdown(&format!(
                "{} — {}",
                format_day_month(day, month),
                user.display_name()
            )));
        }
    }
    Ok(Reply::markdown(text))
}
