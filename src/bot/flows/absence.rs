use anyhow::Result;

use super::{ConversationState, Step};
use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::reply::Reply;
use crate::database::models::{Attendance, AttendanceStatus};

pub const ABSENCE_REASONS: [&str; 4] = [
    "Болезнь",
    "Семейные обстоятельства",
    "Уважительная причина",
    "Другое",
];

pub const CANCEL_LABEL: &str = "Отмена";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsenceState {
    ChoosingReason,
}

fn reason_keyboard(reply: Reply) -> Reply {
    reply.with_keyboard([
        vec![ABSENCE_REASONS[0], ABSENCE_REASONS[1]],
        vec![ABSENCE_REASONS[2], ABSENCE_REASONS[3]],
        vec![CANCEL_LABEL],
    ])
}

pub fn begin() -> (ConversationState, Reply) {
    (
        ConversationState::Absence(AbsenceState::ChoosingReason),
        reason_keyboard(Reply::prompt("Укажите причину отсутствия:")),
    )
}

/// Matches a reason label, ignoring surrounding whitespace and case.
pub fn match_reason(input: &str) -> Option<&'static str> {
    let input = input.trim();
    ABSENCE_REASONS
        .into_iter()
        .find(|reason| reason.to_lowercase() == input.to_lowercase())
}

pub async fn handle(
    engine: &ConversationEngine,
    inbound: &Inbound,
    state: AbsenceState,
) -> Result<Step> {
    match state {
        AbsenceState::ChoosingReason => {
            let Some(reason) = match_reason(&inbound.text) else {
                return Ok(Step::Continue(
                    ConversationState::Absence(state),
                    reason_keyboard(Reply::warning(
                        "Выберите причину кнопкой ниже или нажмите «Отмена».",
                    )),
                ));
            };

            Attendance::mark(
                &engine.db.pool,
                inbound.identity,
                inbound.received_on,
                AttendanceStatus::Absent,
                Some(reason),
                inbound.identity,
            )
            .await?;

            Ok(Step::Finish(
                Reply::success(format!("Отсутствие отмечено. Причина: {reason}"))
                    .remove_keyboard(),
            ))
        }
    }
}
