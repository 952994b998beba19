use anyhow::Result;

use crate::bot::engine::{ConversationEngine, Inbound};
use crate::bot::flows::confirm::{self, ConfirmTarget};
use crate::bot::reply::Reply;
use crate::database::models::Lesson;
use crate::parser::{parse_schedule_submission, ParseError};
use crate::services::authorization::Privilege;
use crate::utils::datetime::{format_date, format_date_with_weekday, format_time_range, parse_full_date};
use crate::utils::logging::log_database_operation;
use crate::utils::markdown::{bold, escape_markdown};

const ADD_USAGE: &str = "Формат: /add_schedule ДД.ММ.ГГГГ: 1. 11:50-13:20 Предмет (тип) (аудитория) Преподаватель, 2. ...";

pub async fn show(engine: &ConversationEngine, inbound: &Inbound, arg: &str) -> Result<Reply> {
    let date = if arg.trim().is_empty() {
        inbound.received_on
    } else {
        match parse_full_date(arg) {
            Some(date) => date,
            None => return Ok(Reply::warning("Неверная дата. Используйте формат ДД.ММ.ГГГГ.")),
        }
    };

    let lessons = Lesson::find_by_date(&engine.db.pool, date).await?;
    if lessons.is_empty() {
        return Ok(Reply::info(format!("На {} занятий нет.", format_date(&date))));
    }

    Ok(Reply::markdown(render_day(&format_date_with_weekday(&date), &lessons)))
}

fn render_day(title: &str, lessons: &[Lesson]) -> String {
    let mut text = format!("📅 {}\n", bold(&escape_markdown(title)));

    for lesson in lessons {
        let mut line = bold(&escape_markdown(&format!("{}.", lesson.lesson_number)));
        if let Some(range) = format_time_range(lesson.start_time, lesson.end_time) {
            line.push(' ');
            line.push_str(&escape_markdown(&range));
        }
        line.push(' ');
        line.push_str(&escape_markdown(&lesson.subject));
        if let Some(lesson_type) = &lesson.lesson_type {
            line.push_str(&escape_markdown(&format!(" ({lesson_type})")));
        }

        let details: Vec<String> = [
            lesson.classroom.as_ref().map(|room| format!("🏫 {}", escape_markdown(room))),
            lesson.teacher.as_ref().map(|teacher| format!("👤 {}", escape_markdown(teacher))),
        ]
        .into_iter()
        .flatten()
        .collect();

        text.push('\n');
        text.push_str(&line);
        if !details.is_empty() {
            text.push_str("\n    ");
            text.push_str(&details.join(" · "));
        }
    }

    text
}

pub async fn add(engine: &ConversationEngine, inbound: &Inbound, arg: &str) -> Result<Reply> {
    if let Some(denied) = engine.deny_unless(inbound.identity, Privilege::Admin).await? {
        return Ok(denied);
    }

    let submission = match parse_schedule_submission(arg) {
        Ok(submission) => submission,
        Err(ParseError::InvalidDate(date)) => {
            return Ok(Reply::warning(format!(
                "Неверная дата «{date}». Используйте формат ДД.ММ.ГГГГ."
            )))
        }
        Err(_) => return Ok(Reply::warning(ADD_USAGE)),
    };

    for failure in &submission.failures {
        tracing::debug!("Skipped schedule clause: {}", failure);
    }

    let added = Lesson::replace_day(&engine.db.pool, submission.date, &submission.lessons).await?;
    log_database_operation(
        "REPLACE DAY",
        "lessons",
        Some(&format!("{} -> {} lessons", submission.date, added)),
    );

    let date = format_date(&submission.date);
    let failed = submission.failures.len();
    let reply = if submission.is_empty_input() {
        Reply::warning(format!("Занятия не указаны. Расписание на {date} очищено."))
    } else if added == 0 {
        Reply::error(format!(
            "Не удалось распознать ни одного занятия ({failed} из {}). Расписание на {date} очищено.\n{ADD_USAGE}",
            submission.clause_count
        ))
    } else if failed > 0 {
        Reply::warning(format!(
            "Расписание на {date}: добавлено занятий: {added}, не распознано: {failed}."
        ))
    } else {
        Reply::success(format!("Расписание на {date}: добавлено занятий: {added}."))
    };
    Ok(reply)
}

pub async fn clear(engine: &ConversationEngine, inbound: &Inbound) -> Result<Reply> {
    if let Some(denied) = engine.deny_unless(inbound.identity, Privilege::Admin).await? {
        return Ok(denied);
    }
    Ok(engine
        .begin(inbound.identity, confirm::begin(ConfirmTarget::Schedule))
        .await)
}
