//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::{CampaignService, SegmentationService};

/// Shared service handles for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub segmentation: Arc<SegmentationService>,
    pub campaigns: Arc<CampaignService>,
}

impl AppState {
    pub fn new(segmentation: Arc<SegmentationService>, campaigns: Arc<CampaignService>) -> Self {
        Self {
            segmentation,
            campaigns,
        }
    }
}
