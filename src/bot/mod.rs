pub mod commands;
pub mod engine;
pub mod flows;
pub mod handlers;
pub mod reply;
pub mod session;
