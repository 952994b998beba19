use anyhow::Result;

use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::flows::absence;
use crate::bot::reply::Reply;
use crate::database::models::{Attendance, AttendanceStatus};
use crate::utils::datetime::format_date;
use crate::utils::markdown::{bold, escape_markdown};

const RECENT_ENTRIES: i64 = 10;

async fn mark(
    engine: &ConversationEngine,
    inbound: &Inbound,
    status: AttendanceStatus,
) -> Result<Reply> {
    Attendance::mark(
        &engine.db.pool,
        inbound.identity,
        inbound.received_on,
        status,
        None,
        inbound.identity,
    )
    .await?;

    Ok(Reply::success(format!(
        "Отмечено на {}: {}",
        format_date(&inbound.received_on),
        status.label()
    ))
    .remove_keyboard())
}

pub async fn here(engine: &ConversationEngine, inbound: &Inbound) -> Result<Reply> {
    mark(engine, inbound, AttendanceStatus::Present).await
}

pub async fn late(engine: &ConversationEngine, inbound: &Inbound) -> Result<Reply> {
    mark(engine, inbound, AttendanceStatus::Late).await
}

pub async fn absent(engine: &ConversationEngine, inbound: &Inbound) -> Reply {
    engine.begin(inbound.identity, absence::begin()).await
}

/// Admins get today's roll; everyone else their own recent marks.
pub async fn show(engine: &ConversationEngine, inbound: &Inbound) -> Result<Reply> {
    let privilege = engine.auth.privilege(inbound.identity).await?;
    let today = format_date(&inbound.received_on);

    if privilege.is_admin() {
        let roll = Attendance::roll_for_date(&engine.db.pool, inbound.received_on).await?;
        if roll.is_empty() {
            return Ok(Reply::info(format!("На {today} отметок нет.")));
        }

        let mut text = format!("📋 {}\n", bold(&escape_markdown(&format!("Посещаемость на {today}"))));
        for entry in &roll {
            let name = entry
                .full_name
                .clone()
                .unwrap_or_else(|| entry.telegram_id.to_string());
            let status = AttendanceStatus::from_db(&entry.status)
                .map_or(entry.status.as_str(), |status| status.label());
            let mut line = format!("{name} — {status}");
            if let Some(reason) = &entry.reason {
                line.push_str(&format!(" ({reason})"));
            }
            text.push('\n');
            text.push_str(&escape_markdown(&line));
        }
        return Ok(Reply::markdown(text));
    }

    let recent = Attendance::recent_for_user(&engine.db.pool, inbound.identity, RECENT_ENTRIES).await?;
    if recent.is_empty() {
        return Ok(Reply::info("У вас пока нет отметок. Используйте /here, /late или /absent."));
    }

    let mut text = String::from("Ваши последние отметки:\n");
    for entry in &recent {
        let status = entry.status().map_or(entry.status.as_str(), |status| status.label());
        text.push_str(&format!("\n{}: {}", format_date(&entry.date), status));
        if let Some(reason) = &entry.reason {
            text.push_str(&format!(" ({reason})"));
        }
    }
    Ok(Reply::plain(text))
}
