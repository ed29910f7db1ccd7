//! Team-chat notifications
//!
//! Fire-and-forget summary events. Delivery failures are the notifier's
//! problem to log; nothing in the engine waits on an acknowledgment.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::dispatch::CampaignSummary;

/// Summary events the engine emits
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NotificationEvent {
    CampaignCreated {
        campaign_id: String,
        name: String,
        campaign_type: String,
        targets: usize,
    },
    CampaignCompleted {
        campaign_id: String,
        name: String,
        summary: CampaignSummary,
    },
    ErrorOccurred {
        context: String,
        message: String,
    },
}

impl NotificationEvent {
    /// Human-readable one-liner for chat channels
    pub fn message(&self) -> String {
        match self {
            Self::CampaignCreated {
                campaign_id,
                name,
                campaign_type,
                targets,
            } => format!(
                "Campaign '{}' ({}) created as {} targeting {} customers",
                name, campaign_id, campaign_type, targets
            ),
            Self::CampaignCompleted {
                campaign_id,
                name,
                summary,
            } => format!(
                "Campaign '{}' ({}) completed: {} sent, {} opened, {} failed",
                name, campaign_id, summary.sent, summary.opened, summary.failed
            ),
            Self::ErrorOccurred { context, message } => {
                format!("Error in {}: {}", context, message)
            }
        }
    }
}

/// Fire-and-forget notification sink
#[async_trait]
pub trait Notifier: Send + Sync + Debug {
    async fn notify(&self, event: NotificationEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_message() {
        let event = NotificationEvent::CampaignCreated {
            campaign_id: "camp-1".to_string(),
            name: "Win-back".to_string(),
            campaign_type: "lost".to_string(),
            targets: 12,
        };

        assert_eq!(
            event.message(),
            "Campaign 'Win-back' (camp-1) created as lost targeting 12 customers"
        );
    }

    #[test]
    fn test_completed_message_includes_summary() {
        let event = NotificationEvent::CampaignCompleted {
            campaign_id: "camp-1".to_string(),
            name: "Win-back".to_string(),
            summary: CampaignSummary {
                sent: 10,
                opened: 4,
                failed: 1,
            },
        };

        assert!(event.message().contains("10 sent, 4 opened, 1 failed"));
    }
}
