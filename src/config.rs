use anyhow::{anyhow, Result};
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/school.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    /// Initial shared admin password. Only written when none is stored yet,
    /// so a password rotated through the bot survives restarts.
    pub admin_password: String,
    pub senior_admin_ids: Vec<i64>,
    /// Local hour at which birthday greetings go out.
    pub birthday_notify_hour: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = required("TELEGRAM_BOT_TOKEN")?;
        let admin_password = required("ADMIN_PASSWORD")?;

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let senior_admin_ids = parse_id_list(&env::var("SENIOR_ADMIN_IDS").unwrap_or_default())?;

        let hour_str = env::var("BIRTHDAY_NOTIFY_HOUR")
            .unwrap_or_else(|_| "9".to_string());
        let birthday_notify_hour = hour_str.trim()
            .parse::<u32>()
            .ok()
            .filter(|hour| *hour < 24)
            .ok_or_else(|| anyhow!("Invalid BIRTHDAY_NOTIFY_HOUR"))?;

        Ok(Config {
            telegram_bot_token: token,
            database_url: database_url_from_env(),
            http_port,
            admin_password,
            senior_admin_ids,
            birthday_notify_hour,
        })
    }
}

/// `DATABASE_URL`, falling back to the default when unset or blank.
pub fn database_url_from_env() -> String {
    env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

fn required(name: &str) -> Result<String> {
    let value = env::var(name).map_err(|_| anyhow!("{name} must be set"))?;
    if value.trim().is_empty() {
        return Err(anyhow!("{name} must be set"));
    }
    Ok(value)
}

/// Parses a comma-separated list of Telegram ids. Blank input is an empty list.
pub fn parse_id_list(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| anyhow!("Invalid SENIOR_ADMIN_IDS entry: '{part}'"))
        })
        .collect()
}
