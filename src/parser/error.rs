//! Typed failures for the ingestion parsers.

use thiserror::Error;

/// Why a schedule or homework submission was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("clause has no leading lesson number: {0}")]
    MissingLessonNumber(String),

    #[error("time range out of bounds: {0}")]
    InvalidTimeRange(String),

    #[error("clause has no subject: {0}")]
    EmptySubject(String),

    #[error("lesson number {0} appears more than once")]
    DuplicateLessonNumber(u32),

    #[error("submission is missing the '<date>:' prefix")]
    MissingDateSeparator,

    #[error("invalid date '{0}', expected dd.mm.yyyy")]
    InvalidDate(String),
}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;
