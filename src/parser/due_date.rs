//! Homework due-date resolution.
//!
//! Admins write `Задачи 1-5 до 01.11`: the `до` marker ("by") followed by a
//! yearless day and month. The year is inferred so the due date is the next
//! occurrence of that day, never one already passed.

use chrono::{Datelike, Duration, NaiveDate};

use crate::utils::datetime::parse_day_month;

/// Days added to the submission day when no usable date is given.
pub const DEFAULT_LEAD_DAYS: i64 = 2;

const MARKER: &str = "до";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueDate {
    pub due_date: NaiveDate,
    /// Description with the marker and date removed.
    pub description: String,
}

/// Resolves the due date of a homework description relative to `today`.
///
/// Without a marker, or when the text after the last marker is not a valid
/// `dd.mm`, the due date falls back to `today + 2 days` and the whole text is
/// kept as the description.
pub fn resolve_due_date(text: &str, today: NaiveDate) -> DueDate {
    let text = text.trim();

    let resolved = split_marker(text).and_then(|(description, date_part)| {
        let (day, month) = parse_day_month(date_part)?;
        let due_date = next_occurrence(day, month, today)?;
        Some(DueDate {
            due_date,
            description: description.trim().to_string(),
        })
    });

    resolved.unwrap_or_else(|| DueDate {
        due_date: today + Duration::days(DEFAULT_LEAD_DAYS),
        description: text.to_string(),
    })
}

/// The first date on or after `today` falling on `day`.`month`.
///
/// Returns `None` when the day does not exist in either this or next year
/// (29.02 outside a leap-year window).
pub fn next_occurrence(day: u32, month: u32, today: NaiveDate) -> Option<NaiveDate> {
    match NaiveDate::from_ymd_opt(today.year(), month, day) {
        Some(date) if date >= today => Some(date),
        _ => NaiveDate::from_ymd_opt(today.year() + 1, month, day),
    }
}

/// Splits around the last whitespace-delimited marker.
fn split_marker(text: &str) -> Option<(&str, &str)> {
    let inner = format!(" {MARKER} ");
    if let Some(index) = text.rfind(&inner) {
        return Some((&text[..index], &text[index + inner.len()..]));
    }
    text.strip_prefix(MARKER)
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map(|rest| ("", rest))
}
