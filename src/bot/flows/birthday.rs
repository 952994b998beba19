use anyhow::Result;
use chrono::NaiveDate;

use super::{ConversationState, Step};
use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::reply::Reply;
use crate::database::models::User;
use crate::utils::datetime::{format_day_month, parse_day_month};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthdayState {
    AwaitingDayMonth,
}

/// Parses `dd.mm`, accepting 29.02 but rejecting days a month never has.
pub fn parse_birthday(input: &str) -> Option<(u32, u32)> {
    let (day, month) = parse_day_month(input)?;
    // 2000 is a leap year
    NaiveDate::from_ymd_opt(2000, month, day).map(|_| (day, month))
}

pub fn begin() -> (ConversationState, Reply) {
    (
        ConversationState::Birthday(BirthdayState::AwaitingDayMonth),
        Reply::prompt("Введите дату рождения в формате ДД.ММ (например, 07.03):").remove_keyboard(),
    )
}

/// Stores the birthday and builds the confirmation.
pub async fn save(engine: &ConversationEngine, identity: i64, day: u32, month: u32) -> Result<Reply> {
    User::set_birthday(&engine.db.pool, identity, day, month).await?;
    Ok(Reply::success(format!(
        "День рождения сохранён: {}",
        format_day_month(day, month)
    )))
}

pub async fn handle(
    engine: &ConversationEngine,
    inbound: &Inbound,
    state: BirthdayState,
) -> Result<Step> {
    match state {
        BirthdayState::AwaitingDayMonth => match parse_birthday(&inbound.text) {
            Some((day, month)) => Ok(Step::Finish(save(engine, inbound.identity, day, month).await?)),
            None => Ok(Step::Continue(
                ConversationState::Birthday(state),
                Reply::warning("Неверный формат. Введите дату как ДД.ММ:"),
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_birthday() {
        assert_eq!(parse_birthday("07.03"), Some((7, 3)));
        assert_eq!(parse_birthday(" 29.02 "), Some((29, 2)));
        assert_eq!(parse_birthday("31.04"), None);
        assert_eq!(parse_birthday("32.01"), None);
        assert_eq!(parse_birthday("07.03.2001"), None);
        assert_eq!(parse_birthday("завтра"), None);
    }
}
