pub mod admin;
pub mod attendance;
pub mod birthday;
pub mod general;
pub mod homework;
pub mod schedule;

use anyhow::Result;
use teloxide::utils::command::BotCommands;

use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::reply::Reply;
use crate::utils::logging::{log_command_start, log_command_success};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "регистрация и приветствие")]
    Start,
    #[command(description = "изменить ФИО")]
    Name,
    #[command(description = "список команд")]
    Help,
    #[command(description = "расписание на дату: /schedule [ДД.ММ.ГГГГ]")]
    Schedule(String),
    #[command(description = "(админ) загрузить расписание: /add_schedule ДД.ММ.ГГГГ: 1. ..., 2. ...")]
    AddSchedule(String),
    #[command(description = "(админ) удалить всё расписание")]
    ClearSchedule,
    #[command(description = "актуальные домашние задания")]
    Homework,
    #[command(description = "(админ) добавить задание: /add_hw Предмет: текст [до ДД.ММ]")]
    AddHw(String),
    #[command(description = "(админ) удалить все домашние задания")]
    ClearHw,
    #[command(description = "отметиться присутствующим")]
    Here,
    #[command(description = "сообщить об опоздании")]
    Late,
    #[command(description = "сообщить об отсутствии")]
    Absent,
    #[command(description = "посещаемость")]
    Attendance,
    #[command(description = "получить права администратора по паролю")]
    Admin,
    #[command(description = "(ст. админ) сменить пароль администратора")]
    SetPassword,
    #[command(description = "(ст. админ) разжаловать администратора")]
    Demote,
    #[command(description = "указать день рождения: /birthday [ДД.ММ]")]
    Birthday(String),
    #[command(description = "список дней рождения")]
    Birthdays,
    #[command(description = "(админ) список пользователей")]
    Users,
    #[command(description = "(админ) объявление всем: /announce текст")]
    Announce(String),
    #[command(description = "отменить текущее действие")]
    Cancel,
}

impl Command {
    /// Commands that may open a flow. They replace whatever flow the user
    /// was in; everything else typed during a flow is input to that flow.
    pub fn starts_flow(&self) -> bool {
        match self {
            Command::Start
            | Command::Name
            | Command::ClearSchedule
            | Command::ClearHw
            | Command::Absent
            | Command::Admin
            | Command::SetPassword
            | Command::Demote => true,
            Command::Birthday(arg) => arg.trim().is_empty(),
            _ => false,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Name => "name",
            Command::Help => "help",
            Command::Schedule(_) => "schedule",
            Command::AddSchedule(_) => "add_schedule",
            Command::ClearSchedule => "clear_schedule",
            Command::Homework => "homework",
            Command::AddHw(_) => "add_hw",
            Command::ClearHw => "clear_hw",
            Command::Here => "here",
            Command::Late => "late",
            Command::Absent => "absent",
            Command::Attendance => "attendance",
            Command::Admin => "admin",
            Command::SetPassword => "set_password",
            Command::Demote => "demote",
            Command::Birthday(_) => "birthday",
            Command::Birthdays => "birthdays",
            Command::Users => "users",
            Command::Announce(_) => "announce",
            Command::Cancel => "cancel",
        }
    }

    pub async fn dispatch(self, engine: &ConversationEngine, inbound: &Inbound) -> Result<Reply> {
        let name = self.name();
        log_command_start(name, inbound.identity, None);

        let reply = match self {
            Command::Start => general::start(engine, inbound).await?,
            Command::Name => general::rename(engine, inbound).await,
            Command::Help => general::help(),
            Command::Schedule(arg) => schedule::show(engine, inbound, &arg).await?,
            Command::AddSchedule(arg) => schedule::add(engine, inbound, &arg).await?,
            Command::ClearSchedule => schedule::clear(engine, inbound).await?,
            Command::Homework => homework::show(engine, inbound).await?,
            Command::AddHw(arg) => homework::add(engine, inbound, &arg).await?,
            Command::ClearHw => homework::clear(engine, inbound).await?,
            Command::Here => attendance::here(engine, inbound).await?,
            Command::Late => attendance::late(engine, inbound).await?,
            Command::Absent => attendance::absent(engine, inbound).await,
            Command::Attendance => attendance::show(engine, inbound).await?,
            Command::Admin => admin::admin(engine, inbound).await?,
            Command::SetPassword => admin::set_password(engine, inbound).await?,
            Command::Demote => admin::demote(engine, inbound).await?,
            Command::Birthday(arg) => birthday::set(engine, inbound, &arg).await?,
            Command::Birthdays => birthday::list(engine).await?,
            Command::Users => admin::users(engine, inbound).await?,
            Command::Announce(arg) => admin::announce(engine, inbound, &arg).await?,
            Command::Cancel => Reply::info("Нет активного действия.").remove_keyboard(),
        };

        log_command_success(name, inbound.identity, None);
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: &str = "school_bot";

    #[test]
    fn test_parse_commands_with_arguments() {
        assert_eq!(
            Command::parse("/schedule 01.12.2025", BOT).ok(),
            Some(Command::Schedule("01.12.2025".to_string()))
        );
        assert_eq!(
            Command::parse("/add_hw Математика: №5 до 01.11", BOT).ok(),
            Some(Command::AddHw("Математика: №5 до 01.11".to_string()))
        );
        assert_eq!(
            Command::parse("/clear_schedule@school_bot", BOT).ok(),
            Some(Command::ClearSchedule)
        );
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert!(Command::parse("Ann Lee", BOT).is_err());
        assert!(Command::parse("/unknown", BOT).is_err());
    }

    #[test]
    fn test_flow_starting_commands() {
        assert!(Command::Start.starts_flow());
        assert!(Command::ClearHw.starts_flow());
        assert!(Command::Birthday(String::new()).starts_flow());
        assert!(!Command::Birthday("07.03".to_string()).starts_flow());
        assert!(!Command::Schedule(String::new()).starts_flow());
        assert!(!Command::Help.starts_flow());
    }
}
