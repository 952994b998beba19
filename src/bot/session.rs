//! Session Store: the one live conversation per user.
//!
//! Backed by teloxide's in-memory dialogue storage (a mutex-guarded map), so
//! sessions vanish on restart. That is intended: every flow is short and the
//! user simply starts it again.

use std::sync::Arc;

use teloxide::dispatching::dialogue::{InMemStorage, Storage};
use teloxide::types::ChatId;

use crate::bot::flows::ConversationState;

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<InMemStorage<ConversationState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            storage: InMemStorage::new(),
        }
    }

    pub async fn get(&self, identity: i64) -> Option<ConversationState> {
        Arc::clone(&self.storage)
            .get_dialogue(ChatId(identity))
            .await
            .ok()
            .flatten()
    }

    /// Replaces whatever session the user had.
    pub async fn set(&self, identity: i64, state: ConversationState) {
        if let Err(e) = Arc::clone(&self.storage)
            .update_dialogue(ChatId(identity), state)
            .await
        {
            tracing::warn!("Failed to store session for {}: {}", identity, e);
        }
    }

    /// Returns whether a session existed.
    pub async fn clear(&self, identity: i64) -> bool {
        Arc::clone(&self.storage)
            .remove_dialogue(ChatId(identity))
            .await
            .is_ok()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
