use anyhow::{anyhow, Result};

pub const MIN_FULL_NAME_CHARS: usize = 5;
pub const MIN_PASSWORD_CHARS: usize = 4;

/// Telegram rejects messages longer than 4096 characters; leave room for the header.
const MAX_ANNOUNCEMENT_CHARS: usize = 4000;

/// Validates a full name and returns it trimmed. Lengths are in characters,
/// not bytes, since most names are Cyrillic.
pub fn validate_full_name(name: &str) -> Result<String> {
    let name = name.trim();

    if name.chars().count() < MIN_FULL_NAME_CHARS {
        return Err(anyhow!("ФИО слишком короткое (минимум {MIN_FULL_NAME_CHARS} символов)"));
    }

    if name.chars().count() > 100 {
        return Err(anyhow!("ФИО слишком длинное (максимум 100 символов)"));
    }

    if name.contains('\n') || name.contains('\r') {
        return Err(anyhow!("ФИО должно быть в одну строку"));
    }

    Ok(name.to_string())
}

pub fn validate_new_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(anyhow!("Пароль должен быть не короче {MIN_PASSWORD_CHARS} символов"));
    }

    if password.trim() != password {
        return Err(anyhow!("Пароль не должен начинаться или заканчиваться пробелом"));
    }

    Ok(())
}

pub fn validate_announcement(text: &str) -> Result<String> {
    let text = text.trim();

    if text.is_empty() {
        return Err(anyhow!("Текст объявления пуст"));
    }

    if text.chars().count() > MAX_ANNOUNCEMENT_CHARS {
        return Err(anyhow!("Объявление длиннее {MAX_ANNOUNCEMENT_CHARS} символов"));
    }

    Ok(text.to_string())
}

/// How an admin refers to another user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserReference {
    Id(i64),
    Username(String),
}

/// Accepts a raw numeric Telegram id or a `@username` handle.
pub fn parse_user_reference(input: &str) -> Result<UserReference> {
    let input = input.trim();

    if let Ok(id) = input.parse::<i64>() {
        if id <= 0 {
            return Err(anyhow!("ID пользователя должен быть положительным числом"));
        }
        return Ok(UserReference::Id(id));
    }

    let handle = input.strip_prefix('@').unwrap_or(input);
    let valid_handle = (3..=32).contains(&handle.len())
        && handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid_handle {
        return Err(anyhow!("Укажите числовой ID или @username"));
    }

    Ok(UserReference::Username(handle.to_string()))
}
