//! Notifier implementations

mod slack;

pub use slack::SlackNotifier;

use async_trait::async_trait;

use crate::domain::{NotificationEvent, Notifier};

/// Notifier used when no webhook is configured
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl NoopNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _event: NotificationEvent) {}
}
