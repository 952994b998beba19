//! # School Admin Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database, starts
//! the birthday scheduler and the health server, and runs the Telegram bot.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use school_admin_bot::bot::engine::ConversationEngine;
use school_admin_bot::bot::handlers::BotHandler;
use school_admin_bot::config::Config;
use school_admin_bot::database::connection::DatabaseManager;
use school_admin_bot::services::authorization::AuthorizationModel;
use school_admin_bot::services::birthday::BirthdayService;
use school_admin_bot::services::health::HealthService;
use school_admin_bot::services::notifier::Notifier;
use school_admin_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "school_admin_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting School Admin Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Database: {}, HTTP Port: {}, senior admins: {}",
        config.database_url,
        config.http_port,
        config.senior_admin_ids.len()
    );

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    info!("Running database migrations...");
    db_manager.run_migrations().await?;
    let db_arc = Arc::new(db_manager);
    info!("Database initialized successfully");

    let auth = AuthorizationModel::new(
        db_arc.as_ref().clone(),
        config.senior_admin_ids.iter().copied(),
    );
    if auth.seed_password(&config.admin_password).await? {
        log_system_event("Admin password seeded from configuration", None);
    }

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let me = bot.get_me().await?;
    let notifier: Arc<dyn Notifier> = Arc::new(bot.clone());
    let engine = Arc::new(ConversationEngine::new(
        db_arc.as_ref().clone(),
        auth,
        notifier.clone(),
        me.username(),
    ));
    let handler = BotHandler::new(engine);
    info!("Telegram bot @{} initialized successfully", me.username());

    // Initialize and start birthday service
    info!("Initializing birthday service...");
    let mut birthday_service =
        match BirthdayService::new(notifier, db_arc.clone(), config.birthday_notify_hour).await {
            Ok(service) => {
                info!("Birthday service initialized successfully");
                service
            }
            Err(e) => {
                tracing::error!("Failed to create birthday service: {}", e);
                return Err(anyhow::anyhow!("Failed to create birthday service: {}", e));
            }
        };

    if let Err(e) = birthday_service.start().await {
        tracing::error!("Failed to start birthday service: {}", e);
    } else {
        info!("Birthday service started successfully");
    }

    // Initialize health service
    let health_service = HealthService::new(db_arc.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    // Stop birthday service on shutdown
    if let Err(e) = birthday_service.stop().await {
        tracing::warn!("Error stopping birthday service: {}", e);
    }

    log_system_event("Application stopped", None);
    Ok(())
}
