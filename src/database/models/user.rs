use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

const USER_COLUMNS: &str =
    "id, telegram_id, username, full_name, birth_day, birth_month, is_admin, created_at";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub birth_day: Option<i64>,
    pub birth_month: Option<i64>,
    pub is_admin: bool,
    pub created_at: String,
}

impl User {
    /// Records a contact: creates the row on first sight and refreshes the
    /// Telegram username otherwise. Name, birthday and admin flag are kept.
    pub async fn touch(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
        username: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT INTO users (telegram_id, username, is_admin, created_at)
            VALUES (?, ?, 0, ?)
            ON CONFLICT(telegram_id) DO UPDATE SET username = COALESCE(excluded.username, users.username)
            "#,
        )
        .bind(telegram_id)
        .bind(username)
        .bind(&now)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_telegram_id(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE telegram_id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(telegram_id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive lookup by Telegram username, with or without `@`.
    pub async fn find_by_username(
        pool: &sqlx::SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let username = username.trim().trim_start_matches('@');
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE lower(username) = lower(?)");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_full_name(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
        full_name: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET full_name = ? WHERE telegram_id = ?")
            .bind(full_name)
            .bind(telegram_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn set_birthday(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
        day: u32,
        month: u32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET birth_day = ?, birth_month = ? WHERE telegram_id = ?")
            .bind(i64::from(day))
            .bind(i64::from(month))
            .bind(telegram_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Returns the number of rows changed; zero means the user is unknown.
    pub async fn set_admin(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
        is_admin: bool,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_admin = ? WHERE telegram_id = ?")
            .bind(is_admin)
            .bind(telegram_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY full_name IS NULL, full_name, telegram_id"
        );
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    pub async fn find_by_birthday(
        pool: &sqlx::SqlitePool,
        day: u32,
        month: u32,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE birth_day = ? AND birth_month = ? ORDER BY telegram_id"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(i64::from(day))
            .bind(i64::from(month))
            .fetch_all(pool)
            .await
    }

    /// Users with a stored birthday, in calendar order.
    pub async fn list_birthdays(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE birth_day IS NOT NULL AND birth_month IS NOT NULL ORDER BY birth_month, birth_day, full_name"
        );
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    pub fn is_registered(&self) -> bool {
        self.full_name.as_deref().is_some_and(|name| !name.trim().is_empty())
    }

    /// Full name when registered, otherwise `@username` or the raw id.
    pub fn display_name(&self) -> String {
        match (&self.full_name, &self.username) {
            (Some(name), _) if !name.trim().is_empty() => name.clone(),
            (_, Some(username)) => format!("@{username}"),
            _ => self.telegram_id.to_string(),
        }
    }

    pub fn birthday(&self) -> Option<(u32, u32)> {
        let day = u32::try_from(self.birth_day?).ok()?;
        let month = u32::try_from(self.birth_month?).ok()?;
        Some((day, month))
    }
}
