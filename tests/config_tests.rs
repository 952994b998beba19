use school_admin_bot::config::{parse_id_list, Config, DEFAULT_DATABASE_URL};
use std::env;
use std::sync::Mutex;

// Mutex to ensure config tests run sequentially to avoid environment variable conflicts
static CONFIG_TEST_MUTEX: Mutex<()> = Mutex::new(());

const OPTIONAL_VARS: [&str; 4] = [
    "DATABASE_URL",
    "HTTP_PORT",
    "SENIOR_ADMIN_IDS",
    "BIRTHDAY_NOTIFY_HOUR",
];

fn set_required() {
    env::set_var("TELEGRAM_BOT_TOKEN", "test_token_123");
    env::set_var("ADMIN_PASSWORD", "secret");
}

fn clean_up() {
    env::remove_var("TELEGRAM_BOT_TOKEN");
    env::remove_var("ADMIN_PASSWORD");
    for var in OPTIONAL_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_config_from_env_with_all_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clean_up();

    set_required();
    env::set_var("DATABASE_URL", "sqlite:test.db");
    env::set_var("HTTP_PORT", "8080");
    env::set_var("SENIOR_ADMIN_IDS", "111, 222");
    env::set_var("BIRTHDAY_NOTIFY_HOUR", "7");

    let config = Config::from_env().unwrap();

    assert_eq!(config.telegram_bot_token, "test_token_123");
    assert_eq!(config.admin_password, "secret");
    assert_eq!(config.database_url, "sqlite:test.db");
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.senior_admin_ids, vec![111, 222]);
    assert_eq!(config.birthday_notify_hour, 7);

    clean_up();
}

#[test]
fn test_config_from_env_with_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clean_up();

    set_required();

    let config = Config::from_env().unwrap();

    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(config.database_url, "sqlite:./data/school.db");
    assert_eq!(config.http_port, 3000);
    assert!(config.senior_admin_ids.is_empty());
    assert_eq!(config.birthday_notify_hour, 9);

    clean_up();
}

#[test]
fn test_config_missing_required_token() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clean_up();

    env::set_var("ADMIN_PASSWORD", "secret");

    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("TELEGRAM_BOT_TOKEN must be set"));

    clean_up();
}

#[test]
fn test_config_missing_admin_password() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clean_up();

    env::set_var("TELEGRAM_BOT_TOKEN", "token");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("ADMIN_PASSWORD must be set"));

    // Blank counts as missing
    env::set_var("ADMIN_PASSWORD", "   ");
    assert!(Config::from_env().is_err());

    clean_up();
}

#[test]
fn test_config_invalid_port() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clean_up();

    set_required();
    env::set_var("HTTP_PORT", "invalid_port");

    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid HTTP_PORT"));

    env::set_var("HTTP_PORT", "-1");
    assert!(Config::from_env().is_err());

    env::set_var("HTTP_PORT", "  3000  ");
    assert_eq!(Config::from_env().unwrap().http_port, 3000);

    clean_up();
}

#[test]
fn test_config_invalid_notify_hour() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clean_up();

    set_required();
    env::set_var("BIRTHDAY_NOTIFY_HOUR", "24");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid BIRTHDAY_NOTIFY_HOUR"));

    env::set_var("BIRTHDAY_NOTIFY_HOUR", "0");
    assert_eq!(Config::from_env().unwrap().birthday_notify_hour, 0);

    clean_up();
}

#[test]
fn test_config_invalid_senior_admin_ids() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clean_up();

    set_required();
    env::set_var("SENIOR_ADMIN_IDS", "123,abc");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid SENIOR_ADMIN_IDS entry: 'abc'"));

    clean_up();
}

#[test]
fn test_config_empty_database_url_uses_default() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clean_up();

    set_required();
    env::set_var("DATABASE_URL", "");
    assert_eq!(Config::from_env().unwrap().database_url, DEFAULT_DATABASE_URL);

    clean_up();
}

#[test]
fn test_parse_id_list() {
    assert_eq!(parse_id_list("").unwrap(), Vec::<i64>::new());
    assert_eq!(parse_id_list(" 1 ,2,, 3 ").unwrap(), vec![1, 2, 3]);
    assert!(parse_id_list("1;2").is_err());
}
