use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

/// Parses a strict `dd.mm.yyyy` date.
pub fn parse_full_date(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.trim().split('.').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    if !is_number(day, 2) || !is_number(month, 2) || year.len() != 4 || !is_number(year, 4) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Parses a yearless `dd.mm` pair. Only the ranges are checked here; whether
/// the day exists in that month depends on the year it is later bound to.
pub fn parse_day_month(input: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = input.trim().split('.').collect();
    let [day, month] = parts.as_slice() else {
        return None;
    };
    if !is_number(day, 2) || !is_number(month, 2) {
        return None;
    }
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    ((1..=31).contains(&day) && (1..=12).contains(&month)).then_some((day, month))
}

fn is_number(part: &str, max_len: usize) -> bool {
    !part.is_empty() && part.len() <= max_len && part.chars().all(|c| c.is_ascii_digit())
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn format_day_month(day: u32, month: u32) -> String {
    format!("{day:02}.{month:02}")
}

pub fn format_time_range(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{}–{}", start.format("%H:%M"), end.format("%H:%M"))),
        _ => None,
    }
}

/// `понедельник, 01.12.2025`
pub fn format_date_with_weekday(date: &NaiveDate) -> String {
    let weekday = match date.weekday() {
        Weekday::Mon => "понедельник",
        Weekday::Tue => "вторник",
        Weekday::Wed => "среда",
        Weekday::Thu => "четверг",
        Weekday::Fri => "пятница",
        Weekday::Sat => "суббота",
        Weekday::Sun => "воскресенье",
    };
    format!("{weekday}, {}", format_date(date))
}
