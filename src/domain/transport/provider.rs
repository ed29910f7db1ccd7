use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::dispatch::DeliveryStatus;
use crate::domain::rendering::RenderedMessage;
use crate::domain::DomainError;

/// Outbound email/chat delivery collaborator.
///
/// Returns the delivery outcome for the ledger to record. Retry and backoff
/// live on the transport's side of the fence, not here.
#[async_trait]
pub trait OutboundTransport: Send + Sync + Debug {
    /// Deliver a rendered message to a recipient address
    async fn deliver(
        &self,
        recipient: &str,
        message: &RenderedMessage,
    ) -> Result<DeliveryStatus, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    /// Scripted transport for tests; remembers every delivery it was asked
    /// to make.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        status: Option<DeliveryStatus>,
        error: Option<String>,
        pub deliveries: Mutex<Vec<(String, RenderedMessage)>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_status(mut self, status: DeliveryStatus) -> Self {
            self.status = Some(status);
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn delivery_count(&self) -> usize {
            self.deliveries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl OutboundTransport for MockTransport {
        async fn deliver(
            &self,
            recipient: &str,
            message: &RenderedMessage,
        ) -> Result<DeliveryStatus, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::transport(error.clone()));
            }

            self.deliveries
                .lock()
                .unwrap()
                .push((recipient.to_string(), message.clone()));

            Ok(self.status.unwrap_or(DeliveryStatus::Sent))
        }
    }
}
