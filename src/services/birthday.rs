use tokio_cron_scheduler::{JobScheduler, Job};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use crate::database::{connection::DatabaseManager, models::User};
use crate::services::notifier::{fan_out, FanOutReport, Notifier};
use std::sync::{Arc, Mutex};

/// How often the job compares the local clock against the notification time.
pub const CHECK_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

/// Minutes after the notification time during which a missed tick still greets.
pub const DUE_WINDOW_MINUTES: i64 = 10;

/// Daily birthday greetings driven by a local-time check.
pub struct BirthdayService {
    notifier: Arc<dyn Notifier>,
    db: Arc<DatabaseManager>,
    notify_at: NaiveTime,
    last_run: Arc<Mutex<Option<NaiveDate>>>,
    scheduler: JobScheduler,
}

impl BirthdayService {
    pub async fn new(
        notifier: Arc<dyn Notifier>,
        db: Arc<DatabaseManager>,
        notify_hour: u32,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;
        let notify_at = NaiveTime::from_hms_opt(notify_hour, 0, 0)
            .ok_or_else(|| format!("invalid notification hour {notify_hour}"))?;

        Ok(Self {
            notifier,
            db,
            notify_at,
            last_run: Arc::new(Mutex::new(None)),
            scheduler,
        })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Local wall-clock check on every tick
        let notifier = self.notifier.clone();
        let db = self.db.clone();
        let last_run = self.last_run.clone();
        let notify_at = self.notify_at;

        let birthday_job = Job::new_repeated_async(CHECK_INTERVAL, move |_uuid, _l| {
            let notifier = notifier.clone();
            let db = db.clone();
            let last_run = last_run.clone();
            Box::pin(async move {
                let now = Local::now().naive_local();
                if !claim_run(&last_run, now, notify_at) {
                    return;
                }
                let today = now.date();
                match send_birthday_greetings(notifier.as_ref(), &db, today).await {
                    Ok(report) => tracing::info!(
                        "Birthday greetings for {}: {} sent, {} failed",
                        today, report.sent, report.failed
                    ),
                    Err(e) => tracing::error!("Failed to load birthdays for {}: {}", today, e),
                }
            })
        })?;

        self.scheduler.add(birthday_job).await?;
        self.scheduler.start().await?;

        tracing::info!(
            "Birthday service started - next run at {}",
            next_run_after(Local::now().naive_local(), self.notify_at)
        );
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    // Manual trigger for testing
    pub async fn run_now(&self, today: NaiveDate) -> Result<FanOutReport, sqlx::Error> {
        send_birthday_greetings(self.notifier.as_ref(), &self.db, today).await
    }
}

/// Whether a tick at local time `now` should send today's greetings.
///
/// Due from `at` until [`DUE_WINDOW_MINUTES`] later, once per calendar day.
pub fn is_due(now: NaiveDateTime, at: NaiveTime, last_run: Option<NaiveDate>) -> bool {
    let since = now.time().signed_duration_since(at);
    last_run != Some(now.date())
        && since >= Duration::zero()
        && since < Duration::minutes(DUE_WINDOW_MINUTES)
}

/// Marks today as run and returns `true` when a tick at `now` is due.
pub fn claim_run(last_run: &Mutex<Option<NaiveDate>>, now: NaiveDateTime, at: NaiveTime) -> bool {
    let Ok(mut last) = last_run.lock() else {
        return false;
    };
    if !is_due(now, at, *last) {
        return false;
    }
    *last = Some(now.date());
    true
}

/// Greets every user whose stored day and month match `today`.
///
/// Delivery failures are isolated per recipient and reported in the count;
/// only a failure to read the users table aborts the run.
pub async fn send_birthday_greetings(
    notifier: &dyn Notifier,
    db: &DatabaseManager,
    today: NaiveDate,
) -> Result<FanOutReport, sqlx::Error> {
    let users = User::find_by_birthday(&db.pool, today.day(), today.month()).await?;
    tracing::debug!("{} birthday(s) on {}", users.len(), today);

    let greetings: Vec<(i64, String)> = users
        .iter()
        .map(|user| (user.telegram_id, birthday_greeting(user)))
        .collect();
    Ok(fan_out(notifier, greetings).await)
}

pub fn birthday_greeting(user: &User) -> String {
    match user.full_name.as_deref().filter(|name| !name.trim().is_empty()) {
        Some(name) => format!("🎉 С днём рождения, {name}! Желаем успехов в учёбе и отличного настроения!"),
        None => "🎉 С днём рождения! Желаем успехов в учёбе и отличного настроения!".to_string(),
    }
}

/// The first instant strictly after `now` whose wall-clock time is `at`.
pub fn next_run_after(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let today_at = now.date().and_time(at);
    if today_at > now {
        today_at
    } else {
        today_at + Duration::days(1)
    }
}
