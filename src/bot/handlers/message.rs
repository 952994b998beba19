//! Telegram adapter: turns messages into engine input and replies into
//! `send_message` calls.

use std::sync::Arc;

use chrono::Local;
use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup, KeyboardRemove, ParseMode};

use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::reply::{Keyboard, Reply};

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    engine: Arc<ConversationEngine>,
) -> HandlerResult {
    // Stickers, photos and service messages carry no text
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(user) = msg.from() else {
        return Ok(());
    };

    let inbound = Inbound {
        identity: user.id.0 as i64,
        username: user.username.clone(),
        text: text.to_string(),
        received_on: Local::now().date_naive(),
    };

    let reply = engine.handle(&inbound).await;
    send_reply(&bot, msg.chat.id, reply).await?;
    Ok(())
}

pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> ResponseResult<()> {
    let mut request = bot.send_message(chat_id, reply.text);
    if reply.markdown {
        request = request.parse_mode(ParseMode::MarkdownV2);
    }

    request = match reply.keyboard {
        Keyboard::Keep => request,
        Keyboard::Suggest(rows) => request.reply_markup(KeyboardMarkup::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>()),
        )),
        Keyboard::Remove => request.reply_markup(KeyboardRemove::new()),
    };

    request.await?;
    Ok(())
}
