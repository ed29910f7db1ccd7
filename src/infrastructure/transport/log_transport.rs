//! Log-only transport for database-less and demo runs

use async_trait::async_trait;
use tracing::info;

use crate::domain::{DeliveryStatus, DomainError, OutboundTransport, RenderedMessage};

/// Logs what would have been sent and reports success. Stands in for the
/// mail gateway when none is configured.
#[derive(Debug, Default)]
pub struct LogOutboundTransport;

impl LogOutboundTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutboundTransport for LogOutboundTransport {
    async fn deliver(
        &self,
        recipient: &str,
        message: &RenderedMessage,
    ) -> Result<DeliveryStatus, DomainError> {
        info!(recipient, subject = %message.subject, "log-only transport: message not actually sent");
        Ok(DeliveryStatus::Sent)
    }
}
