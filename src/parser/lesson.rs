//! Single lesson clause parser.
//!
//! A clause looks like
//! `1. 11:50-13:20 Иностранный язык (семинар) (305к.1) Казакова Е.Д.`
//! and is consumed left to right: lesson number, time range, up to two
//! parenthesized annotations, then subject tokens with the teacher last.

use std::sync::OnceLock;

use chrono::NaiveTime;
use regex::Regex;

use super::error::{ParseError, Result};

/// A lesson decoded from one clause, not yet bound to a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLesson {
    pub lesson_number: u32,
    pub subject: String,
    pub classroom: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub lesson_type: Option<String>,
    pub teacher: Option<String>,
}

// Literal pattern, covered by the tests below.
#[allow(clippy::expect_used)]
fn time_range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d{1,2}):(\d{2})\s*[-–—]\s*(\d{1,2}):(\d{2})").expect("time range pattern")
    })
}

/// Parses one comma-free lesson clause.
///
/// The first parenthesized group is always the lesson type and the second
/// the classroom; the last whitespace token is always the teacher. Both are
/// positional, so a two-word teacher name or a room written before the type
/// will be misattributed.
pub fn parse_lesson_clause(clause: &str) -> Result<ParsedLesson> {
    let clause = clause.trim();

    let lesson_number = take_lesson_number(clause)?;
    let rest = clause.split_once('.').map_or("", |(_, rest)| rest);

    let (times, rest) = take_time_range(rest)?;
    let (lesson_type, classroom, rest) = take_annotations(&rest);

    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let (subject, teacher) = match tokens.as_slice() {
        [] => return Err(ParseError::EmptySubject(clause.to_string())),
        [only] => ((*only).to_string(), None),
        [subject @ .., teacher] => (subject.join(" "), Some((*teacher).to_string())),
    };

    Ok(ParsedLesson {
        lesson_number,
        subject,
        classroom,
        start_time: times.map(|(start, _)| start),
        end_time: times.map(|(_, end)| end),
        lesson_type,
        teacher,
    })
}

fn take_lesson_number(clause: &str) -> Result<u32> {
    let missing = || ParseError::MissingLessonNumber(clause.to_string());

    let (number, _) = clause.split_once('.').ok_or_else(missing)?;
    let number = number.trim();
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(missing());
    }
    number.parse().map_err(|_| missing())
}

fn take_time_range(text: &str) -> Result<(Option<(NaiveTime, NaiveTime)>, String)> {
    let Some(caps) = time_range_pattern().captures(text) else {
        return Ok((None, text.to_string()));
    };
    let span = caps.get(0).map_or(0..0, |m| m.range());

    let start = clock(&caps[1], &caps[2]);
    let end = clock(&caps[3], &caps[4]);
    let (Some(start), Some(end)) = (start, end) else {
        return Err(ParseError::InvalidTimeRange(text[span.clone()].trim().to_string()));
    };

    let mut remainder = String::with_capacity(text.len());
    remainder.push_str(&text[..span.start]);
    remainder.push(' ');
    remainder.push_str(&text[span.end..]);
    Ok((Some((start, end)), remainder))
}

fn clock(hours: &str, minutes: &str) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hours.parse().ok()?, minutes.parse().ok()?, 0)
}

/// Removes the first two `(...)` groups, returning (type, classroom, rest).
fn take_annotations(text: &str) -> (Option<String>, Option<String>, String) {
    let mut groups: Vec<String> = Vec::with_capacity(2);
    let mut remainder = String::with_capacity(text.len());
    let mut rest = text;

    while groups.len() < 2 {
        let Some(open) = rest.find('(') else { break };
        let Some(close) = rest[open..].find(')').map(|offset| open + offset) else {
            break;
        };
        remainder.push_str(&rest[..open]);
        remainder.push(' ');
        groups.push(rest[open + 1..close].trim().to_string());
        rest = &rest[close + 1..];
    }
    remainder.push_str(rest);

    let mut groups = groups.into_iter().map(|g| Some(g).filter(|g| !g.is_empty()));
    let lesson_type = groups.next().flatten();
    let classroom = groups.next().flatten();
    (lesson_type, classroom, remainder)
}
