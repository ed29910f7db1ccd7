//! Slack-style webhook notifier

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::{NotificationEvent, Notifier};

/// Posts campaign events to a team chat webhook. Fire-and-forget: a failed
/// post is logged and dropped, never propagated.
#[derive(Debug)]
pub struct SlackNotifier {
    client: Client,
    webhook_url: String,
}

impl SlackNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, event: NotificationEvent) {
        let payload = json!({ "text": event.message() });

        match self.client.post(&self.webhook_url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(event = ?event, "notification delivered");
            }
            Ok(response) => {
                warn!(status = %response.status(), "notification webhook rejected event");
            }
            Err(e) => {
                warn!(error = %e, "notification webhook unreachable");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_posts_event_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "text": "Error in dispatch: boom"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = SlackNotifier::new(server.uri());
        notifier
            .notify(NotificationEvent::ErrorOccurred {
                context: "dispatch".to_string(),
                message: "boom".to_string(),
            })
            .await;
    }

    #[tokio::test]
    async fn test_unreachable_webhook_does_not_panic() {
        let notifier = SlackNotifier::new("http://127.0.0.1:9/unreachable");
        notifier
            .notify(NotificationEvent::ErrorOccurred {
                context: "dispatch".to_string(),
                message: "boom".to_string(),
            })
            .await;
    }
}
