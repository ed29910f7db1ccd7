use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::campaign::MessageIntent;
use crate::domain::customer::Customer;
use crate::domain::DomainError;

/// Rendered subject and HTML body for one customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

/// The language-generation collaborator. Treated as unreliable: an
/// implementation must return within a bounded time or surface
/// `RenderingTimeout` instead of blocking the dispatch loop.
#[async_trait]
pub trait MessageRenderer: Send + Sync + Debug {
    /// Render personalized subject/body text from a message intent and the
    /// customer's attributes
    async fn render(
        &self,
        intent: &MessageIntent,
        customer: &Customer,
    ) -> Result<RenderedMessage, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Scripted renderer for tests
    #[derive(Debug, Default)]
    pub struct MockRenderer {
        error: Option<String>,
        timeout_ms: Option<u64>,
        /// Customer IDs for which rendering should fail
        fail_for: Vec<i64>,
    }

    impl MockRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn with_timeout(mut self, elapsed_ms: u64) -> Self {
            self.timeout_ms = Some(elapsed_ms);
            self
        }

        pub fn failing_for(mut self, customer_id: i64) -> Self {
            self.fail_for.push(customer_id);
            self
        }
    }

    #[async_trait]
    impl MessageRenderer for MockRenderer {
        async fn render(
            &self,
            intent: &MessageIntent,
            customer: &Customer,
        ) -> Result<RenderedMessage, DomainError> {
            if let Some(elapsed_ms) = self.timeout_ms {
                return Err(DomainError::RenderingTimeout { elapsed_ms });
            }

            if let Some(ref error) = self.error {
                return Err(DomainError::transport(error.clone()));
            }

            if self.fail_for.contains(&customer.id().value()) {
                return Err(DomainError::transport(format!(
                    "scripted failure for customer {}",
                    customer.id()
                )));
            }

            Ok(RenderedMessage {
                subject: format!("{} for {}", intent.objective, customer.name),
                body: format!("<p>Hi {},</p><p>{}</p>", customer.name, intent.call_to_action),
            })
        }
    }
}
