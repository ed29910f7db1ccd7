//! HTTP client for the outbound mail gateway

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{DeliveryStatus, DomainError, OutboundTransport, RenderedMessage};

/// Transport backed by an external mail gateway.
///
/// HTTP-level rejection of a message becomes a `failed`/`bounced` outcome for
/// the ledger; only a broken connection is an error, since the caller cannot
/// tell whether the message left.
#[derive(Debug)]
pub struct HttpOutboundTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    to: &'a str,
    subject: &'a str,
    /// HTML body
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    status: Option<String>,
}

impl HttpOutboundTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl OutboundTransport for HttpOutboundTransport {
    async fn deliver(
        &self,
        recipient: &str,
        message: &RenderedMessage,
    ) -> Result<DeliveryStatus, DomainError> {
        let request = SendRequest {
            to: recipient,
            subject: &message.subject,
            body: &message.body,
        };

        let url = format!("{}/send", self.base_url);
        let call = self.client.post(&url).json(&request).send();

        let response = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                DomainError::transport(format!(
                    "Mail gateway did not answer within {}ms",
                    self.timeout.as_millis()
                ))
            })?
            .map_err(|e| DomainError::transport(format!("Mail gateway request failed: {}", e)))?;

        if !response.status().is_success() {
            warn!(recipient, status = %response.status(), "mail gateway rejected message");
            return Ok(DeliveryStatus::Failed);
        }

        let body: SendResponse = response.json().await.unwrap_or(SendResponse { status: None });

        let status = match body.status.as_deref() {
            Some("bounced") => DeliveryStatus::Bounced,
            Some("failed") => DeliveryStatus::Failed,
            _ => DeliveryStatus::Sent,
        };

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn message() -> RenderedMessage {
        RenderedMessage {
            subject: "We miss you!".to_string(),
            body: "<p>Hi</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_deliver_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send"))
            .and(body_json_string(
                r#"{"to":"asha@example.com","subject":"We miss you!","body":"<p>Hi</p>"}"#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "sent"
            })))
            .mount(&server)
            .await;

        let transport = HttpOutboundTransport::new(server.uri(), Duration::from_secs(5));
        let status = transport
            .deliver("asha@example.com", &message())
            .await
            .unwrap();
        assert_eq!(status, DeliveryStatus::Sent);
    }

    #[tokio::test]
    async fn test_gateway_rejection_is_failed_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let transport = HttpOutboundTransport::new(server.uri(), Duration::from_secs(5));
        let status = transport
            .deliver("asha@example.com", &message())
            .await
            .unwrap();
        assert_eq!(status, DeliveryStatus::Failed);
    }

    #[tokio::test]
    async fn test_bounce_reported_by_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "bounced"
            })))
            .mount(&server)
            .await;

        let transport = HttpOutboundTransport::new(server.uri(), Duration::from_secs(5));
        let status = transport
            .deliver("asha@example.com", &message())
            .await
            .unwrap();
        assert_eq!(status, DeliveryStatus::Bounced);
    }
}
