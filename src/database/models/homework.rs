use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Homework {
    pub id: i64,
    pub subject: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub added_by: i64,
    pub created_at: String,
}

impl Homework {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        subject: String,
        description: String,
        due_date: NaiveDate,
        added_by: i64,
    ) -> Result<Self, sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO homework (subject, description, due_date, added_by, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&subject)
        .bind(&description)
        .bind(due_date)
        .bind(added_by)
        .bind(&now)
        .execute(pool)
        .await?;

        Ok(Homework {
            id: result.last_insert_rowid(),
            subject,
            description,
            due_date,
            added_by,
            created_at: now,
        })
    }

    /// Homework due today or later. Past entries stay in the table.
    pub async fn find_upcoming(
        pool: &sqlx::SqlitePool,
        today: NaiveDate,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Homework>(
            "SELECT id, subject, description, due_date, added_by, created_at FROM homework WHERE due_date >= ? ORDER BY due_date, id"
        )
        .bind(today)
        .fetch_all(pool)
        .await
    }

    pub async fn delete_all(pool: &sqlx::SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM homework").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
