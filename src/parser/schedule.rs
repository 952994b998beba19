//! Whole-day schedule submissions: `<dd.mm.yyyy>: <clause>, <clause>, ...`.

use std::collections::HashSet;

use chrono::NaiveDate;

use super::error::{ParseError, Result};
use super::lesson::{parse_lesson_clause, ParsedLesson};
use crate::utils::datetime::parse_full_date;

/// Outcome of parsing a submission. Only the date is mandatory; individual
/// clause failures are collected instead of aborting the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSubmission {
    pub date: NaiveDate,
    pub lessons: Vec<ParsedLesson>,
    pub clause_count: usize,
    pub failures: Vec<ParseError>,
}

impl ScheduleSubmission {
    /// True when nothing followed the date prefix.
    pub fn is_empty_input(&self) -> bool {
        self.clause_count == 0
    }
}

/// Parses a `dd.mm.yyyy: <clause>, <clause>` message into one day of lessons.
pub fn parse_schedule_submission(raw: &str) -> Result<ScheduleSubmission> {
    let (date_part, clause_list) = raw.split_once(':').ok_or(ParseError::MissingDateSeparator)?;
    let date = parse_full_date(date_part)
        .ok_or_else(|| ParseError::InvalidDate(date_part.trim().to_string()))?;

    let clauses = split_top_level(clause_list);
    let mut seen = HashSet::new();
    let mut lessons = Vec::with_capacity(clauses.len());
    let mut failures = Vec::new();

    for clause in &clauses {
        match parse_lesson_clause(clause) {
            Ok(lesson) if !seen.insert(lesson.lesson_number) => {
                failures.push(ParseError::DuplicateLessonNumber(lesson.lesson_number));
            }
            Ok(lesson) => lessons.push(lesson),
            Err(e) => failures.push(e),
        }
    }

    Ok(ScheduleSubmission {
        date,
        lessons,
        clause_count: clauses.len(),
        failures,
    })
}

/// Splits on commas that are not inside parentheses, dropping blank pieces.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);

    pieces.into_iter().map(str::trim).filter(|p| !p.is_empty()).collect()
}
