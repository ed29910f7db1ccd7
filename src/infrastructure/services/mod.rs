//! Orchestration services over the domain traits

mod campaign_service;
mod segmentation;

pub use campaign_service::{CampaignProposal, CampaignService, DispatchReport};
pub use segmentation::{CohortClassification, SegmentationService};
