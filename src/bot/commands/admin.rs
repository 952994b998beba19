use anyhow::Result;

use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::flows::{admin_password, demote as demote_flow, password_rotation};
use crate::bot::reply::Reply;
use crate::database::models::User;
use crate::services::authorization::Privilege;
use crate::services::notifier::fan_out;
use crate::utils::markdown::{bold, escape_markdown};
use crate::utils::validation::validate_announcement;

pub async fn admin(engine: &ConversationEngine, inbound: &Inbound) -> Result<Reply> {
    if engine.auth.privilege(inbound.identity).await?.is_admin() {
        return Ok(Reply::info("Вы уже администратор."));
    }
    Ok(engine.begin(inbound.identity, admin_password::begin()).await)
}

pub async fn set_password(engine: &ConversationEngine, inbound: &Inbound) -> Result<Reply> {
    if let Some(denied) = engine.deny_unless(inbound.identity, Privilege::SeniorAdmin).await? {
        return Ok(denied);
    }
    Ok(engine.begin(inbound.identity, password_rotation::begin()).await)
}

pub async fn demote(engine: &ConversationEngine, inbound: &Inbound) -> Result<Reply> {
    if let Some(denied) = engine.deny_unless(inbound.identity, Privilege::SeniorAdmin).await? {
        return Ok(denied);
    }
    Ok(engine.begin(inbound.identity, demote_flow::begin()).await)
}

pub async fn users(engine: &ConversationEngine, inbound: &Inbound) -> Result<Reply> {
    if let Some(denied) = engine.deny_unless(inbound.identity, Privilege::Admin).await? {
        return Ok(denied);
    }

    let users = User::list_all(&engine.db.pool).await?;
    let mut text = format!("👥 {}\n", bold(&escape_markdown(&format!("Пользователи ({})", users.len()))));
    for user in &users {
        let marker = if engine.auth.is_senior_admin(user.telegram_id) {
            " ⭐⭐"
        } else if user.is_admin {
            " ⭐"
        } else {
            ""
        };
        let mut line = format!("{} — {}{}", user.telegram_id, user.display_name(), marker);
        if let (Some(username), true) = (&user.username, user.is_registered()) {
            line.push_str(&format!(" (@{username})"));
        }
        text.push('\n');
        text.push_str(&escape_markdown(&line));
    }
    Ok(Reply::markdown(text))
}

/// Sends the text to every known user except the sender.
pub async fn announce(engine: &ConversationEngine, inbound: &Inbound, arg: &str) -> Result<Reply> {
    if let Some(denied) = engine.deny_unless(inbound.identity, Privilege::Admin).await? {
        return Ok(denied);
    }

    let body = match validate_announcement(arg) {
        Ok(body) => body,
        Err(e) => return Ok(Reply::warning(format!("{e}. Формат: /announce текст"))),
    };

    let message = format!("📢 Объявление\n\n{body}");
    let recipients: Vec<(i64, String)> = User::list_all(&engine.db.pool)
        .await?
        .into_iter()
        .filter(|user| user.telegram_id != inbound.identity)
        .map(|user| (user.telegram_id, message.clone()))
        .collect();

    let report = fan_out(engine.notifier.as_ref(), recipients).await;
    tracing::info!(
        "Announcement by {}: {} sent, {} failed",
        inbound.identity, report.sent, report.failed
    );

    let reply = if report.failed == 0 {
        Reply::success(format!("Объявление отправлено: {}", report.sent))
    } else {
        Reply::warning(format!(
            "Объявление отправлено: {}, не доставлено: {}",
            report.sent, report.failed
        ))
    };
    Ok(reply)
}
