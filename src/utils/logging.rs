use tracing::{debug, error, info};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, identity: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_START: {} by {} - {}", command, identity, d),
        None => info!("CMD_START: {} by {}", command, identity),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, identity: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_SUCCESS: {} by {} - {}", command, identity, d),
        None => info!("CMD_SUCCESS: {} by {}", command, identity),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, identity: i64, error: &str) {
    error!("CMD_ERROR: {} by {} - {}", command, identity, error);
}

/// Logs conversation state changes with consistent format
pub fn log_flow_transition(identity: i64, from: &str, to: &str) {
    debug!("FLOW: {} {} -> {}", identity, from, to);
}

/// Logs database operations with consistent format
pub fn log_database_operation(operation: &str, table: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("DB_OP: {} on {} - {}", operation, table, d),
        None => debug!("DB_OP: {} on {}", operation, table),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
