//! In-memory campaign repository

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{Campaign, CampaignId, CampaignRepository, DomainError};

/// In-memory implementation backed by a map
#[derive(Debug, Default)]
pub struct InMemoryCampaignRepository {
    campaigns: RwLock<HashMap<CampaignId, Campaign>>,
}

impl InMemoryCampaignRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CampaignRepository for InMemoryCampaignRepository {
    async fn create(&self, campaign: Campaign) -> Result<Campaign, DomainError> {
        let mut campaigns = self
            .campaigns
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        if campaigns.contains_key(campaign.id()) {
            return Err(DomainError::validation(format!(
                "Campaign '{}' already exists",
                campaign.id()
            )));
        }

        campaigns.insert(campaign.id().clone(), campaign.clone());
        Ok(campaign)
    }

    async fn get(&self, id: &CampaignId) -> Result<Option<Campaign>, DomainError> {
        let campaigns = self
            .campaigns
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(campaigns.get(id).cloned())
    }

    async fn update(&self, campaign: &Campaign) -> Result<Campaign, DomainError> {
        let mut campaigns = self
            .campaigns
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        if !campaigns.contains_key(campaign.id()) {
            return Err(DomainError::not_found(format!(
                "Campaign '{}' not found",
                campaign.id()
            )));
        }

        campaigns.insert(campaign.id().clone(), campaign.clone());
        Ok(campaign.clone())
    }

    async fn list(&self) -> Result<Vec<Campaign>, DomainError> {
        let campaigns = self
            .campaigns
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        let mut all: Vec<_> = campaigns.values().cloned().collect();
        all.sort_by_key(|c| c.created_at);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CampaignStatus, CampaignType};

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = InMemoryCampaignRepository::new();
        let campaign = Campaign::new("Win-back", CampaignType::Lost, "");
        let id = campaign.id().clone();

        repo.create(campaign).await.unwrap();
        let found = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(found.status(), CampaignStatus::Draft);
    }

    #[tokio::test]
    async fn test_double_create_rejected() {
        let repo = InMemoryCampaignRepository::new();
        let campaign = Campaign::new("Win-back", CampaignType::Lost, "");

        repo.create(campaign.clone()).await.unwrap();
        assert!(repo.create(campaign).await.is_err());
    }

    #[tokio::test]
    async fn test_update_persists_status() {
        let repo = InMemoryCampaignRepository::new();
        let mut campaign = Campaign::new("Win-back", CampaignType::Lost, "");
        let id = campaign.id().clone();
        repo.create(campaign.clone()).await.unwrap();

        campaign.activate().unwrap();
        repo.update(&campaign).await.unwrap();

        let found = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(found.status(), CampaignStatus::Active);
    }

    #[tokio::test]
    async fn test_update_unknown_campaign() {
        let repo = InMemoryCampaignRepository::new();
        let campaign = Campaign::new("Win-back", CampaignType::Lost, "");
        let err = repo.update(&campaign).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
