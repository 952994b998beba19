pub mod message;

use std::sync::Arc;

use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::bot::engine::ConversationEngine;

pub struct BotHandler {
    pub engine: Arc<ConversationEngine>,
}

impl BotHandler {
    pub fn new(engine: Arc<ConversationEngine>) -> Self {
        Self { engine }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        use teloxide::dispatching::UpdateFilterExt;

        let engine = self.engine.clone();

        Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
            let engine = engine.clone();
            async move { message::message_handler(bot, msg, engine).await }
        })
    }
}
