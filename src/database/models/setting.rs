use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Key of the shared password that grants admin rights.
pub const ADMIN_PASSWORD_KEY: &str = "admin_password";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

impl Setting {
    pub async fn get(pool: &sqlx::SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    pub async fn set(pool: &sqlx::SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT INTO settings (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Stores `value` only if the key is absent. Returns whether it was stored.
    pub async fn seed(pool: &sqlx::SqlitePool, key: &str, value: &str) -> Result<bool, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query("INSERT OR IGNORE INTO settings (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(&now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
