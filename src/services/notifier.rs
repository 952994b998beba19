//! Outbound delivery to individual users.
//!
//! Broadcasts and birthday greetings go through [`Notifier`] rather than the
//! Telegram client directly, so fan-out behaviour can be exercised in tests.

use async_trait::async_trait;
use teloxide::prelude::*;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, identity: i64, text: &str) -> anyhow::Result<()>;
}

#[async_trait]
impl Notifier for Bot {
    async fn notify(&self, identity: i64, text: &str) -> anyhow::Result<()> {
        self.send_message(ChatId(identity), text).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutReport {
    pub sent: usize,
    pub failed: usize,
}

/// Sends every message independently. A failed recipient is logged and
/// counted; it never stops delivery to the rest.
pub async fn fan_out<I>(notifier: &dyn Notifier, messages: I) -> FanOutReport
where
    I: IntoIterator<Item = (i64, String)>,
{
    let mut report = FanOutReport::default();

    for (identity, text) in messages {
        match notifier.notify(identity, &text).await {
            Ok(()) => report.sent += 1,
            Err(e) => {
                report.failed += 1;
                tracing::warn!("Failed to deliver message to {}: {}", identity, e);
            }
        }
    }

    report
}
