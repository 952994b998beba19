//! Confirmation before bulk deletes. One attempt only: anything but the
//! exact phrase abandons the flow.

use anyhow::Result;

use super::{ConversationState, Step};
use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::reply::Reply;
use crate::database::models::{Homework, Lesson};
use crate::services::authorization::Privilege;
use crate::utils::logging::log_database_operation;

pub const CONFIRMATION_PHRASE: &str = "ПОДТВЕРЖДАЮ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmTarget {
    Homework,
    Schedule,
}

impl ConfirmTarget {
    fn description(self) -> &'static str {
        match self {
            ConfirmTarget::Homework => "все домашние задания",
            ConfirmTarget::Schedule => "всё расписание",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    AwaitingConfirmationPhrase(ConfirmTarget),
}

pub fn begin(target: ConfirmTarget) -> (ConversationState, Reply) {
    (
        ConversationState::DestructiveConfirm(ConfirmState::AwaitingConfirmationPhrase(target)),
        Reply::warning(format!(
            "Будут удалены {}. Это действие нельзя отменить.\nЧтобы продолжить, отправьте: {CONFIRMATION_PHRASE}",
            target.description()
        ))
        .remove_keyboard(),
    )
}

pub async fn handle(
    engine: &ConversationEngine,
    inbound: &Inbound,
    state: ConfirmState,
) -> Result<Step> {
    let ConfirmState::AwaitingConfirmationPhrase(target) = state;

    if inbound.text.trim() != CONFIRMATION_PHRASE {
        return Ok(Step::Finish(Reply::info("Удаление отменено.")));
    }

    // Admin rights may have been revoked while the phrase was pending.
    if let Some(denied) = engine.deny_unless(inbound.identity, Privilege::Admin).await? {
        return Ok(Step::Finish(denied));
    }

    let deleted = match target {
        ConfirmTarget::Homework => Homework::delete_all(&engine.db.pool).await?,
        ConfirmTarget::Schedule => Lesson::delete_all(&engine.db.pool).await?,
    };
    let table = match target {
        ConfirmTarget::Homework => "homework",
        ConfirmTarget::Schedule => "lessons",
    };
    log_database_operation("DELETE ALL", table, Some(&format!("{deleted} rows")));

    Ok(Step::Finish(Reply::success(format!("Удалено записей: {deleted}"))))
}
