use anyhow::Result;

use super::{ConversationState, Step};
use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::reply::Reply;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPasswordState {
    AwaitingPassword,
}

pub fn begin() -> (ConversationState, Reply) {
    (
        ConversationState::AdminPassword(AdminPasswordState::AwaitingPassword),
        Reply::prompt("Введите пароль администратора:").remove_keyboard(),
    )
}

pub async fn handle(
    engine: &ConversationEngine,
    inbound: &Inbound,
    state: AdminPasswordState,
) -> Result<Step> {
    match state {
        AdminPasswordState::AwaitingPassword => {
            if !engine.auth.check_password(&inbound.text).await? {
                tracing::warn!("Wrong admin password from {}", inbound.identity);
                return Ok(Step::Finish(Reply::error("Неверный пароль.")));
            }

            engine.auth.grant_admin(inbound.identity).await?;
            tracing::info!("User {} promoted to admin", inbound.identity);
            Ok(Step::Finish(Reply::success(
                "Вы получили права администратора.",
            )))
        }
    }
}
