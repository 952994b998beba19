//! # School Admin Bot
//!
//! A Telegram assistant for a study group: admins publish the timetable and
//! homework as free text, everyone else looks them up and reports attendance.
//!
//! ## Features
//! - Free-text timetable ingestion (`1. 11:50-13:20 Предмет (тип) (ауд.) Преподаватель, ...`)
//! - Homework with `до dd.mm` due dates and year rollover
//! - Attendance self-reporting with absence reasons
//! - Password-based admin promotion and a senior-admin allowlist
//! - Daily birthday greetings
//! - Persistent storage with SQLite

/// Conversation engine, flows, command handlers and the Telegram adapter
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Timetable and homework text parsing
pub mod parser;
/// Authorization, notifications, birthday scheduling and health probes
pub mod services;
/// Utility functions for datetime, validation, and formatting
pub mod utils;
