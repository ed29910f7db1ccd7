//! Campaign repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::{Campaign, CampaignId};

/// Persistence for campaigns. Campaigns are created by the engine and never
/// deleted by it; archival is an external concern.
#[async_trait]
pub trait CampaignRepository: Send + Sync + Debug {
    /// Persist a new campaign, failing if the ID already exists
    async fn create(&self, campaign: Campaign) -> Result<Campaign, DomainError>;

    /// Get a campaign by ID
    async fn get(&self, id: &CampaignId) -> Result<Option<Campaign>, DomainError>;

    /// Update an existing campaign (status transitions)
    async fn update(&self, campaign: &Campaign) -> Result<Campaign, DomainError>;

    /// List all campaigns
    async fn list(&self) -> Result<Vec<Campaign>, DomainError>;
}
