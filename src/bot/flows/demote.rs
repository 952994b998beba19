use anyhow::Result;

use super::{ConversationState, Step};
use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::reply::Reply;
use crate::services::authorization::{DemoteOutcome, Privilege};
use crate::utils::validation::parse_user_reference;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoteState {
    AwaitingTargetIdentity,
}

pub fn begin() -> (ConversationState, Reply) {
    (
        ConversationState::Demote(DemoteState::AwaitingTargetIdentity),
        Reply::prompt("Укажите ID или @username администратора, которого нужно разжаловать:")
            .remove_keyboard(),
    )
}

pub async fn handle(
    engine: &ConversationEngine,
    inbound: &Inbound,
    state: DemoteState,
) -> Result<Step> {
    match state {
        DemoteState::AwaitingTargetIdentity => {
            if let Some(denied) = engine
                .deny_unless(inbound.identity, Privilege::SeniorAdmin)
                .await?
            {
                return Ok(Step::Finish(denied));
            }

            let reference = match parse_user_reference(&inbound.text) {
                Ok(reference) => reference,
                Err(e) => {
                    return Ok(Step::Continue(
                        ConversationState::Demote(state),
                        Reply::warning(format!("{e}. Попробуйте ещё раз:")),
                    ))
                }
            };

            let Some(target) = engine.auth.resolve(&reference).await? else {
                return Ok(Step::Finish(Reply::error("Пользователь не найден.")));
            };

            let reply = match engine.auth.demote(target).await? {
                DemoteOutcome::Demoted => {
                    tracing::info!("User {} demoted by {}", target, inbound.identity);
                    Reply::success(format!("Пользователь {target} больше не администратор."))
                }
                DemoteOutcome::Protected => {
                    Reply::error("Старшего администратора нельзя разжаловать.")
                }
                DemoteOutcome::NotAdmin => Reply::warning("Этот пользователь не администратор."),
                DemoteOutcome::UnknownUser => Reply::error("Пользователь не найден."),
            };
            Ok(Step::Finish(reply))
        }
    }
}
