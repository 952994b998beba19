use anyhow::Result;

use super::{ConversationState, Step};
use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::reply::Reply;
use crate::database::models::User;
use crate::utils::validation::{validate_full_name, MIN_FULL_NAME_CHARS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    AwaitingFullName,
}

pub fn begin() -> (ConversationState, Reply) {
    (
        ConversationState::Registration(RegistrationState::AwaitingFullName),
        Reply::prompt(format!(
            "Введите ваше ФИО (не короче {MIN_FULL_NAME_CHARS} символов):"
        ))
        .remove_keyboard(),
    )
}

pub async fn handle(
    engine: &ConversationEngine,
    inbound: &Inbound,
    state: RegistrationState,
) -> Result<Step> {
    match state {
        RegistrationState::AwaitingFullName => match validate_full_name(&inbound.text) {
            Ok(full_name) => {
                User::set_full_name(&engine.db.pool, inbound.identity, &full_name).await?;
                Ok(Step::Finish(Reply::success(format!(
                    "Приятно познакомиться, {full_name}! Список команд: /help"
                ))))
            }
            Err(e) => Ok(Step::Continue(
                ConversationState::Registration(state),
                Reply::warning(format!("{e}. Попробуйте ещё раз:")),
            )),
        },
    }
}
