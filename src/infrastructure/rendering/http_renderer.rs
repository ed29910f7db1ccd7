//! HTTP client for the language-generation service

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{Customer, DomainError, MessageIntent, MessageRenderer, RenderedMessage};

/// Renderer backed by an external language-generation service.
///
/// The service is treated as unreliable: every call runs under a timeout and
/// an elapsed timeout surfaces as `RenderingTimeout` instead of blocking the
/// dispatch loop.
#[derive(Debug)]
pub struct HttpMessageRenderer {
    client: Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    intent: &'a MessageIntent,
    customer: CustomerContext<'a>,
}

/// The slice of customer data the renderer needs for personalization
#[derive(Debug, Serialize)]
struct CustomerContext<'a> {
    name: &'a str,
    region: Option<&'a str>,
    last_purchase: Option<DateTime<Utc>>,
    total_spend: f64,
    product_categories: &'a [String],
}

#[derive(Debug, Deserialize)]
struct RenderResponse {
    subject: String,
    body: String,
}

impl HttpMessageRenderer {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl MessageRenderer for HttpMessageRenderer {
    async fn render(
        &self,
        intent: &MessageIntent,
        customer: &Customer,
    ) -> Result<RenderedMessage, DomainError> {
        let request = RenderRequest {
            intent,
            customer: CustomerContext {
                name: &customer.name,
                region: customer.region.as_deref(),
                last_purchase: customer.last_purchase,
                total_spend: customer.total_spend,
                product_categories: &customer.product_categories,
            },
        };

        let url = format!("{}/render", self.base_url);
        let call = self.client.post(&url).json(&request).send();

        let response = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| DomainError::RenderingTimeout {
                elapsed_ms: self.timeout.as_millis() as u64,
            })?
            .map_err(|e| DomainError::transport(format!("Renderer request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::transport(format!(
                "Renderer returned HTTP {}",
                response.status()
            )));
        }

        let rendered: RenderResponse = response
            .json()
            .await
            .map_err(|e| DomainError::transport(format!("Bad renderer response: {}", e)))?;

        Ok(RenderedMessage {
            subject: rendered.subject,
            body: rendered.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::domain::CampaignType;

    fn customer() -> Customer {
        Customer::new(1, "Asha", "asha@example.com", Utc::now())
            .with_product_categories(vec!["books".to_string()])
    }

    #[tokio::test]
    async fn test_render_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/render"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "subject": "We miss you, Asha!",
                "body": "<p>Hi Asha</p>"
            })))
            .mount(&server)
            .await;

        let renderer = HttpMessageRenderer::new(server.uri(), Duration::from_secs(5));
        let intent = MessageIntent::for_campaign_type(CampaignType::Lost);

        let rendered = renderer.render(&intent, &customer()).await.unwrap();
        assert_eq!(rendered.subject, "We miss you, Asha!");
        assert_eq!(rendered.body, "<p>Hi Asha</p>");
    }

    #[tokio::test]
    async fn test_slow_renderer_surfaces_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/render"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(500))
                    .set_body_json(serde_json::json!({"subject": "s", "body": "b"})),
            )
            .mount(&server)
            .await;

        let renderer = HttpMessageRenderer::new(server.uri(), Duration::from_millis(50));
        let intent = MessageIntent::for_campaign_type(CampaignType::Lost);

        let err = renderer.render(&intent, &customer()).await.unwrap_err();
        assert!(matches!(err, DomainError::RenderingTimeout { .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_http_error_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/render"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let renderer = HttpMessageRenderer::new(server.uri(), Duration::from_secs(5));
        let intent = MessageIntent::for_campaign_type(CampaignType::Lost);

        let err = renderer.render(&intent, &customer()).await.unwrap_err();
        assert!(matches!(err, DomainError::Transport { .. }));
    }
}
