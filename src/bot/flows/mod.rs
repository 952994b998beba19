//! Multi-step conversations.
//!
//! Each flow owns a small state enum of its own; [`ConversationState`] only
//! tags which flow a user is in so the session store can hold any of them.
//! A state handler consumes one inbound message and either stays in the flow
//! (re-prompt or next state) or finishes it, which clears the session.

pub mod absence;
pub mod admin_password;
pub mod birthday;
pub mod confirm;
pub mod demote;
pub mod password_rotation;
pub mod registration;

use anyhow::Result;

use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::reply::Reply;

pub use absence::AbsenceState;
pub use admin_password::AdminPasswordState;
pub use birthday::BirthdayState;
pub use confirm::{ConfirmState, ConfirmTarget};
pub use demote::DemoteState;
pub use password_rotation::PasswordRotationState;
pub use registration::RegistrationState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationState {
    Registration(RegistrationState),
    Absence(AbsenceState),
    DestructiveConfirm(ConfirmState),
    AdminPassword(AdminPasswordState),
    PasswordRotation(PasswordRotationState),
    Demote(DemoteState),
    Birthday(BirthdayState),
}

impl ConversationState {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ConversationState::Registration(_) => "registration",
            ConversationState::Absence(_) => "absence",
            ConversationState::DestructiveConfirm(ConfirmState::AwaitingConfirmationPhrase(
                ConfirmTarget::Homework,
            )) => "confirm_clear_homework",
            ConversationState::DestructiveConfirm(ConfirmState::AwaitingConfirmationPhrase(
                ConfirmTarget::Schedule,
            )) => "confirm_clear_schedule",
            ConversationState::AdminPassword(_) => "admin_password",
            ConversationState::PasswordRotation(_) => "password_rotation",
            ConversationState::Demote(_) => "demote",
            ConversationState::Birthday(_) => "birthday",
        }
    }
}

/// Outcome of feeding one message to the active state.
#[derive(Debug)]
pub enum Step {
    /// Keep the session, possibly in a new state.
    Continue(ConversationState, Reply),
    /// The flow is over; the session is cleared.
    Finish(Reply),
}

pub async fn advance(
    engine: &ConversationEngine,
    inbound: &Inbound,
    state: ConversationState,
) -> Result<Step> {
    match state {
        ConversationState::Registration(state) => registration::handle(engine, inbound, state).await,
        ConversationState::Absence(state) => absence::handle(engine, inbound, state).await,
        ConversationState::DestructiveConfirm(state) => confirm::handle(engine, inbound, state).await,
        ConversationState::AdminPassword(state) => admin_password::handle(engine, inbound, state).await,
        ConversationState::PasswordRotation(state) => {
            password_rotation::handle(engine, inbound, state).await
        }
        ConversationState::Demote(state) => demote::handle(engine, inbound, state).await,
        ConversationState::Birthday(state) => birthday::handle(engine, inbound, state).await,
    }
}
