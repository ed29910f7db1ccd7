//! Campaign drafts and message intents

use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerId;

use super::{Campaign, CampaignType};

/// Messaging intent for a campaign: what the rendered copy should accomplish,
/// not the copy itself. Rendering is the language-generation collaborator's
/// job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageIntent {
    pub objective: String,
    pub tone: String,
    pub call_to_action: String,
}

impl MessageIntent {
    /// Canonical intent for each of the nine campaign types
    pub fn for_campaign_type(campaign_type: CampaignType) -> Self {
        let (objective, call_to_action) = match campaign_type {
            CampaignType::Loyalty => (
                "Thank high-value customers for their loyalty",
                "Redeem your loyalty reward on your next order",
            ),
            CampaignType::Referral => (
                "Encourage high-value customers to refer others with a discount",
                "Share your referral code and both of you save",
            ),
            CampaignType::ReEngagement => (
                "Target customers who have not purchased in a long time",
                "Come back and see what's new since your last visit",
            ),
            CampaignType::AtRisk => (
                "Target customers likely to churn",
                "Claim a personal offer before it expires",
            ),
            CampaignType::NewCustomer => (
                "Welcome and onboard new customers",
                "Complete your profile and unlock your welcome perk",
            ),
            CampaignType::Champion => (
                "Reward your best customers",
                "Enjoy early access reserved for our top customers",
            ),
            CampaignType::AboutToSleep => (
                "Re-activate customers who are becoming inactive",
                "Pick up where you left off with a small thank-you discount",
            ),
            CampaignType::Lost => (
                "Attempt to win back lost customers",
                "Give us another try with a welcome-back offer",
            ),
            CampaignType::PotentialLoyalist => (
                "Nurture promising new customers",
                "Join the loyalty program and start earning points",
            ),
        };

        Self {
            objective: objective.to_string(),
            tone: "friendly and conversational".to_string(),
            call_to_action: call_to_action.to_string(),
        }
    }
}

/// An unactivated, reviewable proposal to send a campaign to a cohort.
///
/// A draft is not persisted; turning it into a `Campaign` (still at draft
/// status) is what the campaign service does after selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub campaign_type: CampaignType,
    pub name: String,
    pub description: String,
    pub intent: MessageIntent,
    pub target_customers: Vec<CustomerId>,
}

impl CampaignDraft {
    /// Materialize the draft as a persistable campaign. Status starts at
    /// draft; activation is a separate, explicit operation.
    pub fn into_campaign(self) -> Campaign {
        Campaign::new(self.name, self.campaign_type, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::campaign::CampaignStatus;

    #[test]
    fn test_every_type_has_an_intent() {
        for campaign_type in CampaignType::all() {
            let intent = MessageIntent::for_campaign_type(campaign_type);
            assert!(!intent.objective.is_empty());
            assert!(!intent.call_to_action.is_empty());
        }
    }

    #[test]
    fn test_draft_materializes_at_draft_status() {
        let draft = CampaignDraft {
            campaign_type: CampaignType::Lost,
            name: "Win-back".to_string(),
            description: "Attempt to win back lost customers".to_string(),
            intent: MessageIntent::for_campaign_type(CampaignType::Lost),
            target_customers: vec![CustomerId::new(1)],
        };

        let campaign = draft.into_campaign();
        assert_eq!(campaign.status(), CampaignStatus::Draft);
        assert_eq!(campaign.campaign_type, CampaignType::Lost);
    }
}
