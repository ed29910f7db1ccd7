//! Built-in template renderer
//!
//! Fallback when no language-generation service is configured. Produces
//! plain personalized HTML from the message intent; good enough for demos
//! and tests, deliberately unambitious.

use async_trait::async_trait;

use crate::domain::{Customer, DomainError, MessageIntent, MessageRenderer, RenderedMessage};

#[derive(Debug, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessageRenderer for TemplateRenderer {
    async fn render(
        &self,
        intent: &MessageIntent,
        customer: &Customer,
    ) -> Result<RenderedMessage, DomainError> {
        let subject = format!("{}, {}!", intent.objective, customer.name);

        let last_purchase_line = match customer.last_purchase {
            Some(at) => format!(
                "<p>Your last order was on {}.</p>",
                at.format("%B %-d, %Y")
            ),
            None => String::new(),
        };

        let body = format!(
            "<p>Hi {name},</p>{last_purchase_line}<p>{cta}.</p>",
            name = customer.name,
            cta = intent.call_to_action,
        );

        Ok(RenderedMessage { subject, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::CampaignType;

    #[tokio::test]
    async fn test_template_personalizes_by_name() {
        let renderer = TemplateRenderer::new();
        let customer = Customer::new(1, "Asha", "asha@example.com", Utc::now());
        let intent = MessageIntent::for_campaign_type(CampaignType::NewCustomer);

        let rendered = renderer.render(&intent, &customer).await.unwrap();
        assert!(rendered.subject.contains("Asha"));
        assert!(rendered.body.contains("Hi Asha"));
        assert!(rendered.body.contains(&intent.call_to_action));
    }
}
