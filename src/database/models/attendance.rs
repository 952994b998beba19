use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            "late" => Some(AttendanceStatus::Late),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "✅ присутствует",
            AttendanceStatus::Absent => "❌ отсутствует",
            AttendanceStatus::Late => "⏰ опаздывает",
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Attendance {
    pub id: i64,
    pub telegram_id: i64,
    pub date: NaiveDate,
    pub status: String, // 'present', 'absent', 'late'
    pub reason: Option<String>,
    pub marked_by: i64,
    pub marked_at: String,
}

/// One line of a day's roll, joined with the user's stored name.
#[derive(Debug, Clone, FromRow)]
pub struct RollEntry {
    pub telegram_id: i64,
    pub full_name: Option<String>,
    pub status: String,
    pub reason: Option<String>,
}

impl Attendance {
    /// Writes the mark for (user, date), replacing any earlier mark that day.
    pub async fn mark(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
        reason: Option<&str>,
        marked_by: i64,
    ) -> Result<Self, sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO attendance (telegram_id, date, status, reason, marked_by, marked_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(telegram_id, date) DO UPDATE SET
                status = excluded.status,
                reason = excluded.reason,
                marked_by = excluded.marked_by,
                marked_at = excluded.marked_at
            "#,
        )
        .bind(telegram_id)
        .bind(date)
        .bind(status.as_str())
        .bind(reason)
        .bind(marked_by)
        .bind(&now)
        .execute(pool)
        .await?;

        Self::find_for(pool, telegram_id, date)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_for(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Attendance>(
            "SELECT id, telegram_id, date, status, reason, marked_by, marked_at FROM attendance WHERE telegram_id = ? AND date = ?"
        )
        .bind(telegram_id)
        .bind(date)
        .fetch_optional(pool)
        .await
    }

    pub async fn count_for(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
        date: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendance WHERE telegram_id = ? AND date = ?"
        )
        .bind(telegram_id)
        .bind(date)
        .fetch_one(pool)
        .await
    }

    pub async fn recent_for_user(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Attendance>(
            "SELECT id, telegram_id, date, status, reason, marked_by, marked_at FROM attendance WHERE telegram_id = ? ORDER BY date DESC LIMIT ?"
        )
        .bind(telegram_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn roll_for_date(
        pool: &sqlx::SqlitePool,
        date: NaiveDate,
    ) -> Result<Vec<RollEntry>, sqlx::Error> {
        sqlx::query_as::<_, RollEntry>(
            r#"
            SELECT a.telegram_id, u.full_name, a.status, a.reason
            FROM attendance a
            LEFT JOIN users u ON u.telegram_id = a.telegram_id
            WHERE a.date = ?
            ORDER BY a.status, u.full_name
            "#,
        )
        .bind(date)
        .fetch_all(pool)
        .await
    }

    pub fn status(&self) -> Option<AttendanceStatus> {
        AttendanceStatus::from_db(&self.status)
    }
}
