//! Campaign API request/response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Campaign, CampaignStatus, CampaignSummary, CampaignType, MessageIntent, Segment,
};
use crate::infrastructure::services::{CampaignProposal, DispatchReport};

/// POST /v1/campaigns request body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaignRequest {
    /// Segment whose current cohort the campaign targets
    pub segment: Segment,
    /// Optional override of the segment's canonical campaign type
    #[serde(default)]
    pub campaign_type: Option<CampaignType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignResponse {
    pub id: String,
    pub name: String,
    pub campaign_type: CampaignType,
    pub description: String,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        Self {
            id: campaign.id().to_string(),
            status: campaign.status(),
            name: campaign.name,
            campaign_type: campaign.campaign_type,
            description: campaign.description,
            created_at: campaign.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignsListResponse {
    pub campaigns: Vec<CampaignResponse>,
}

/// Response for a freshly drafted campaign, including its review context
#[derive(Debug, Clone, Serialize)]
pub struct CampaignProposalResponse {
    pub campaign: CampaignResponse,
    pub intent: MessageIntent,
    pub targets: usize,
}

impl From<CampaignProposal> for CampaignProposalResponse {
    fn from(proposal: CampaignProposal) -> Self {
        Self {
            campaign: proposal.campaign.into(),
            intent: proposal.intent,
            targets: proposal.targets,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchReportResponse {
    pub attempted: u64,
    pub sent: u64,
    pub already_sent: u64,
    pub failed: u64,
}

impl From<DispatchReport> for DispatchReportResponse {
    fn from(report: DispatchReport) -> Self {
        Self {
            attempted: report.attempted,
            sent: report.sent,
            already_sent: report.already_sent,
            failed: report.failed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignSummaryResponse {
    pub campaign_id: String,
    pub sent: u64,
    pub opened: u64,
    pub failed: u64,
}

impl CampaignSummaryResponse {
    pub fn new(campaign_id: impl Into<String>, summary: CampaignSummary) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            sent: summary.sent,
            opened: summary.opened,
            failed: summary.failed,
        }
    }
}
