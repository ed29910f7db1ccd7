//! In-memory dispatch ledger
//!
//! A single mutex over both indexes makes the duplicate check and the insert
//! one atomic step, which is the whole point of the ledger.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{
    CampaignId, CampaignSummary, CustomerId, DeliveryStatus, DispatchLedger, DomainError,
    SendRecord, SendRecordId,
};

#[derive(Debug, Default)]
struct Inner {
    by_id: HashMap<SendRecordId, SendRecord>,
    by_pair: HashMap<(CampaignId, CustomerId), SendRecordId>,
}

/// In-memory implementation of the dispatch ledger
#[derive(Debug, Default)]
pub struct InMemoryDispatchLedger {
    inner: Mutex<Inner>,
}

impl InMemoryDispatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, DomainError> {
        self.inner
            .lock()
            .map_err(|e| DomainError::internal(format!("Failed to acquire ledger lock: {}", e)))
    }
}

#[async_trait]
impl DispatchLedger for InMemoryDispatchLedger {
    async fn record_send(&self, record: SendRecord) -> Result<SendRecord, DomainError> {
        let mut inner = self.lock()?;
        let pair = (record.campaign_id.clone(), record.customer_id);

        if inner.by_pair.contains_key(&pair) {
            return Err(DomainError::duplicate_send(
                record.campaign_id.as_str(),
                record.customer_id.value(),
            ));
        }

        inner.by_pair.insert(pair, record.id().clone());
        inner.by_id.insert(record.id().clone(), record.clone());
        Ok(record)
    }

    async fn get(&self, id: &SendRecordId) -> Result<Option<SendRecord>, DomainError> {
        Ok(self.lock()?.by_id.get(id).cloned())
    }

    async fn find(
        &self,
        campaign_id: &CampaignId,
        customer_id: &CustomerId,
    ) -> Result<Option<SendRecord>, DomainError> {
        let inner = self.lock()?;
        let record = inner
            .by_pair
            .get(&(campaign_id.clone(), *customer_id))
            .and_then(|id| inner.by_id.get(id))
            .cloned();
        Ok(record)
    }

    async fn list_by_campaign(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<Vec<SendRecord>, DomainError> {
        let inner = self.lock()?;
        let mut records: Vec<_> = inner
            .by_id
            .values()
            .filter(|r| &r.campaign_id == campaign_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.sent_at);
        Ok(records)
    }

    async fn mark_opened(&self, id: &SendRecordId) -> Result<SendRecord, DomainError> {
        let mut inner = self.lock()?;

        match inner.by_id.get_mut(id) {
            Some(record) => {
                record.mark_opened();
                Ok(record.clone())
            }
            None => Err(DomainError::not_found(format!(
                "Send record '{}' not found",
                id
            ))),
        }
    }

    async fn mark_outcome(
        &self,
        id: &SendRecordId,
        status: DeliveryStatus,
    ) -> Result<SendRecord, DomainError> {
        let mut inner = self.lock()?;

        match inner.by_id.get_mut(id) {
            Some(record) => {
                record.set_status(status);
                Ok(record.clone())
            }
            None => Err(DomainError::not_found(format!(
                "Send record '{}' not found",
                id
            ))),
        }
    }

    async fn campaign_summary(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<CampaignSummary, DomainError> {
        let inner = self.lock()?;
        let mut summary = CampaignSummary::default();

        for record in inner.by_id.values() {
            if &record.campaign_id == campaign_id {
                summary.add_record(record);
            }
        }

        Ok(summary)
    }
}
