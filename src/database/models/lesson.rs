use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::parser::ParsedLesson;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    pub date: NaiveDate,
    pub lesson_number: i64,
    pub subject: String,
    pub classroom: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub lesson_type: Option<String>,
    pub teacher: Option<String>,
}

impl Lesson {
    /// Full-day replace: deletes every lesson on `date` and inserts `lessons`
    /// inside one transaction, so a failure leaves the old day untouched.
    pub async fn replace_day(
        pool: &sqlx::SqlitePool,
        date: NaiveDate,
        lessons: &[ParsedLesson],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM lessons WHERE date = ?")
            .bind(date)
            .execute(&mut tx)
            .await?;

        let mut inserted = 0;
        for lesson in lessons {
            let result = sqlx::query(
                r#"
                INSERT INTO lessons (date, lesson_number, subject, classroom, start_time, end_time, lesson_type, teacher)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(date)
            .bind(i64::from(lesson.lesson_number))
            .bind(&lesson.subject)
            .bind(&lesson.classroom)
            .bind(lesson.start_time)
            .bind(lesson.end_time)
            .bind(&lesson.lesson_type)
            .bind(&lesson.teacher)
            .execute(&mut tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn find_by_date(
        pool: &sqlx::SqlitePool,
        date: NaiveDate,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Lesson>(
            "SELECT id, date, lesson_number, subject, classroom, start_time, end_time, lesson_type, teacher FROM lessons WHERE date = ? ORDER BY lesson_number"
        )
        .bind(date)
        .fetch_all(pool)
        .await
    }

    pub async fn delete_all(pool: &sqlx::SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lessons").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
