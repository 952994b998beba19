//! Free-text ingestion parsers for admin submissions.
//!
//! Everything in here is pure: no storage, no clock. Callers pass "today"
//! explicitly so the rules can be tested against fixed dates.

pub mod due_date;
pub mod error;
pub mod lesson;
pub mod schedule;

pub use due_date::{next_occurrence, resolve_due_date, DueDate, DEFAULT_LEAD_DAYS};
pub use error::{ParseError, Result};
pub use lesson::{parse_lesson_clause, ParsedLesson};
pub use schedule::{parse_schedule_submission, ScheduleSubmission};
