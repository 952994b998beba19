use anyhow::Result;

use super::{ConversationState, Step};
use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::reply::Reply;
use crate::services::authorization::Privilege;
use crate::utils::validation::{validate_new_password, MIN_PASSWORD_CHARS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRotationState {
    AwaitingNewPassword,
}

pub fn begin() -> (ConversationState, Reply) {
    (
        ConversationState::PasswordRotation(PasswordRotationState::AwaitingNewPassword),
        Reply::prompt(format!(
            "Введите новый пароль администратора (не короче {MIN_PASSWORD_CHARS} символов):"
        ))
        .remove_keyboard(),
    )
}

pub async fn handle(
    engine: &ConversationEngine,
    inbound: &Inbound,
    state: PasswordRotationState,
) -> Result<Step> {
    match state {
        PasswordRotationState::AwaitingNewPassword => {
            if let Some(denied) = engine
                .deny_unless(inbound.identity, Privilege::SeniorAdmin)
                .await?
            {
                return Ok(Step::Finish(denied));
            }

            if let Err(e) = validate_new_password(&inbound.text) {
                return Ok(Step::Continue(
                    ConversationState::PasswordRotation(state),
                    Reply::warning(format!("{e}. Попробуйте ещё раз:")),
                ));
            }

            engine.auth.rotate_password(&inbound.text).await?;
            tracing::info!("Admin password rotated by {}", inbound.identity);
            Ok(Step::Finish(Reply::success("Пароль администратора изменён.")))
        }
    }
}
