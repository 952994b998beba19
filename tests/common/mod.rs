#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use school_admin_bot::bot::engine::{ConversationEngine, Inbound};
use school_admin_bot::bot::reply::Reply;
use school_admin_bot::database::connection::DatabaseManager;
use school_admin_bot::services::authorization::AuthorizationModel;
use school_admin_bot::services::notifier::Notifier;
use tempfile::{tempdir, TempDir};

pub const ADMIN_PASSWORD: &str = "Secret42";
pub const SENIOR_ID: i64 = 1000;

pub async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.run_migrations().await?;

    Ok((db_manager, temp_dir))
}

/// Records every delivery; ids in `failing` get an error instead.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(i64, String)>>,
    pub failing: HashSet<i64>,
}

impl RecordingNotifier {
    pub fn failing_for(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: ids.into_iter().collect(),
        }
    }

    pub fn recipients(&self) -> Vec<i64> {
        self.sent.lock().unwrap().iter().map(|(id, _)| *id).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, identity: i64, text: &str) -> Result<()> {
        if self.failing.contains(&identity) {
            return Err(anyhow!("chat {identity} not found"));
        }
        self.sent.lock().unwrap().push((identity, text.to_string()));
        Ok(())
    }
}

pub struct TestBot {
    pub engine: ConversationEngine,
    pub db: DatabaseManager,
    pub notifier: Arc<RecordingNotifier>,
    pub today: NaiveDate,
    _temp_dir: TempDir,
}

impl TestBot {
    pub async fn new() -> Result<Self> {
        Self::with_notifier(RecordingNotifier::default()).await
    }

    pub async fn with_notifier(notifier: RecordingNotifier) -> Result<Self> {
        let (db, temp_dir) = setup_test_db().await?;
        let auth = AuthorizationModel::new(db.clone(), [SENIOR_ID]);
        auth.seed_password(ADMIN_PASSWORD).await?;

        let notifier = Arc::new(notifier);
        let engine = ConversationEngine::new(db.clone(), auth, notifier.clone(), "school_bot");

        Ok(Self {
            engine,
            db,
            notifier,
            today: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            _temp_dir: temp_dir,
        })
    }

    pub async fn send(&self, identity: i64, text: &str) -> Reply {
        self.engine.handle(&Inbound::new(identity, text, self.today)).await
    }

    pub async fn send_as(&self, identity: i64, username: &str, text: &str) -> Reply {
        let inbound = Inbound::new(identity, text, self.today).with_username(username);
        self.engine.handle(&inbound).await
    }

    /// Registers `identity` and makes it an admin through the password flow.
    pub async fn make_admin(&self, identity: i64) {
        self.send(identity, "/admin").await;
        self.send(identity, ADMIN_PASSWORD).await;
    }
}
