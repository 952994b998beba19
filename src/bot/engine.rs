//! The conversation engine: one entry point per inbound message.
//!
//! Routing order for a message:
//! 1. cancel words end any active flow;
//! 2. a flow-starting command supersedes the active flow;
//! 3. any other input goes to the active flow, even if it looks like a command;
//! 4. with no flow, commands dispatch to their stateless handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::Command;
use crate::bot::flows::{self, ConversationState, Step};
use crate::bot::reply::Reply;
use crate::bot::session::SessionStore;
use crate::database::connection::DatabaseManager;
use crate::database::models::User;
use crate::services::authorization::{AuthorizationModel, Privilege};
use crate::services::notifier::Notifier;
use crate::utils::logging::{log_command_error, log_flow_transition};

const CANCEL_WORDS: [&str; 3] = ["отмена", "cancel", "/cancel"];

/// A text message from one user, stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub identity: i64,
    pub username: Option<String>,
    pub text: String,
    /// Local calendar day the message arrived; "today" for every handler.
    pub received_on: NaiveDate,
}

impl Inbound {
    pub fn new(identity: i64, text: impl Into<String>, received_on: NaiveDate) -> Self {
        Self {
            identity,
            username: None,
            text: text.into(),
            received_on,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// Routes each inbound message to the active flow or to command dispatch.
pub struct ConversationEngine {
    pub(crate) db: DatabaseManager,
    pub(crate) auth: AuthorizationModel,
    pub(crate) notifier: Arc<dyn Notifier>,
    sessions: SessionStore,
    bot_username: String,
}

impl ConversationEngine {
    pub fn new(
        db: DatabaseManager,
        auth: AuthorizationModel,
        notifier: Arc<dyn Notifier>,
        bot_username: impl Into<String>,
    ) -> Self {
        Self {
            db,
            auth,
            notifier,
            sessions: SessionStore::new(),
            bot_username: bot_username.into(),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn authorization(&self) -> &AuthorizationModel {
        &self.auth
    }

    /// Handles one message and always produces a reply. Storage failures
    /// are logged and answered with a generic error.
    pub async fn handle(&self, inbound: &Inbound) -> Reply {
        match self.try_handle(inbound).await {
            Ok(reply) => reply,
            Err(e) => {
                log_command_error("message", inbound.identity, &format!("{e:#}"));
                Reply::error("Произошла ошибка. Попробуйте позже.")
            }
        }
    }

    async fn try_handle(&self, inbound: &Inbound) -> Result<Reply> {
        User::touch(&self.db.pool, inbound.identity, inbound.username.as_deref())
            .await
            .context("failed to record contact")?;

        let session = self.sessions.get(inbound.identity).await;

        if is_cancel(&inbound.text) {
            return Ok(match session {
                Some(state) => {
                    self.sessions.clear(inbound.identity).await;
                    log_flow_transition(inbound.identity, state.name(), "cancelled");
                    Reply::info("Действие отменено.").remove_keyboard()
                }
                None => Reply::info("Нет активного действия.").remove_keyboard(),
            });
        }

        let command = Command::parse(&inbound.text, &self.bot_username).ok();

        match (command, session) {
            (Some(command), Some(state)) if command.starts_flow() => {
                self.sessions.clear(inbound.identity).await;
                log_flow_transition(inbound.identity, state.name(), "superseded");
                command.dispatch(self, inbound).await
            }
            (_, Some(state)) => self.advance(inbound, state).await,
            (Some(command), None) => command.dispatch(self, inbound).await,
            (None, None) => Ok(Reply::info(
                "Не понимаю сообщение. Список команд: /help",
            )),
        }
    }

    async fn advance(&self, inbound: &Inbound, state: ConversationState) -> Result<Reply> {
        let from = state.name();

        match flows::advance(self, inbound, state).await? {
            Step::Continue(next, reply) => {
                if next.name() != from {
                    log_flow_transition(inbound.identity, from, next.name());
                }
                self.sessions.set(inbound.identity, next).await;
                Ok(reply)
            }
            Step::Finish(reply) => {
                self.sessions.clear(inbound.identity).await;
                log_flow_transition(inbound.identity, from, "idle");
                Ok(reply)
            }
        }
    }

    /// Opens a flow, replacing any session the user had.
    pub(crate) async fn begin(&self, identity: i64, (state, reply): (ConversationState, Reply)) -> Reply {
        log_flow_transition(identity, "idle", state.name());
        self.sessions.set(identity, state).await;
        reply
    }

    /// `Some(denial)` when `identity` lacks `required`.
    pub(crate) async fn deny_unless(&self, identity: i64, required: Privilege) -> Result<Option<Reply>> {
        let privilege = self.auth.privilege(identity).await?;
        if privilege >= required {
            return Ok(None);
        }

        tracing::warn!("Denied {:?} action to {} ({:?})", required, identity, privilege);
        let message = match required {
            Privilege::SeniorAdmin => "Команда доступна только старшим администраторам.",
            _ => "Команда доступна только администраторам.",
        };
        Ok(Some(Reply::error(message)))
    }
}

/// `Отмена`, `cancel` or `/cancel` (optionally `/cancel@bot`), any case.
pub fn is_cancel(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    let word = text.split('@').next().unwrap_or_default();
    CANCEL_WORDS.contains(&word) && (word.starts_with('/') || !text.contains('@'))
}
