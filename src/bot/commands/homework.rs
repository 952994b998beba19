use anyhow::Result;

use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::flows::confirm::{self, ConfirmTarget};
use crate::bot::reply::Reply;
use crate::database::models::Homework;
use crate::parser::resolve_due_date;
use crate::services::authorization::Privilege;
use crate::utils::datetime::format_date;
use crate::utils::markdown::{bold, escape_markdown};

const ADD_USAGE: &str = "Формат: /add_hw Предмет: текст задания [до ДД.ММ]";

pub async fn show(engine: &ConversationEngine, inbound: &Inbound) -> Result<Reply> {
    let homework = Homework::find_upcoming(&engine.db.pool, inbound.received_on).await?;
    if homework.is_empty() {
        return Ok(Reply::info("Актуальных домашних заданий нет."));
    }

    let mut text = format!("📚 {}\n", bold("Домашние задания"));
    for item in &homework {
        text.push_str(&format!(
            "\n{} \\(до {}\\)\n{}\n",
            bold(&escape_markdown(&item.subject)),
            escape_markdown(&format_date(&item.due_date)),
            escape_markdown(&item.description)
        ));
    }
    Ok(Reply::markdown(text))
}

/// Splits `<subject>: <description>`; both parts must be non-empty.
pub fn split_submission(arg: &str) -> Option<(&str, &str)> {
    let (subject, description) = arg.split_once(':')?;
    let (subject, description) = (subject.trim(), description.trim());
    (!subject.is_empty() && !description.is_empty()).then_some((subject, description))
}

pub async fn add(engine: &ConversationEngine, inbound: &Inbound, arg: &str) -> Result<Reply> {
    if let Some(denied) = engine.deny_unless(inbound.identity, Privilege::Admin).await? {
        return Ok(denied);
    }

    let Some((subject, text)) = split_submission(arg) else {
        return Ok(Reply::warning(ADD_USAGE));
    };

    let due = resolve_due_date(text, inbound.received_on);
    if due.description.is_empty() {
        return Ok(Reply::warning(ADD_USAGE));
    }

    let homework = Homework::create(
        &engine.db.pool,
        subject.to_string(),
        due.description,
        due.due_date,
        inbound.identity,
    )
    .await?;

    Ok(Reply::success(format!(
        "Задание по предмету «{}» добавлено. Срок: {}",
        homework.subject,
        format_date(&homework.due_date)
    )))
}

pub async fn clear(engine: &ConversationEngine, inbound: &Inbound) -> Result<Reply> {
    if let Some(denied) = engine.deny_unless(inbound.identity, Privilege::Admin).await? {
        return Ok(denied);
    }
    Ok(engine
        .begin(inbound.identity, confirm::begin(ConfirmTarget::Homework))
        .await)
}
