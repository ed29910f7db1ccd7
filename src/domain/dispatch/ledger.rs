//! Dispatch ledger trait
//!
//! The authoritative record of which customer received which campaign. Its
//! uniqueness guarantee on (campaign, customer) is the system's central
//! correctness property: no customer receives the same campaign twice.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::campaign::CampaignId;
use crate::domain::customer::CustomerId;
use crate::domain::DomainError;

use super::{CampaignSummary, DeliveryStatus, SendRecord, SendRecordId};

#[async_trait]
pub trait DispatchLedger: Send + Sync + Debug {
    /// Atomically claim the (campaign, customer) pair and store the record.
    ///
    /// The duplicate check and the insert are a single atomic step: under
    /// concurrent calls for the same pair, exactly one succeeds and the rest
    /// fail with `DuplicateSend`.
    async fn record_send(&self, record: SendRecord) -> Result<SendRecord, DomainError>;

    /// Get a send record by ID
    async fn get(&self, id: &SendRecordId) -> Result<Option<SendRecord>, DomainError>;

    /// Look up the record for a (campaign, customer) pair, if any
    async fn find(
        &self,
        campaign_id: &CampaignId,
        customer_id: &CustomerId,
    ) -> Result<Option<SendRecord>, DomainError>;

    /// All records for a campaign
    async fn list_by_campaign(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<Vec<SendRecord>, DomainError>;

    /// One-way, idempotent open flag driven by the external read-receipt
    /// signal. Marking an already-opened record again is a no-op, not an
    /// error.
    async fn mark_opened(&self, id: &SendRecordId) -> Result<SendRecord, DomainError>;

    /// Record the transport's asynchronous delivery outcome
    async fn mark_outcome(
        &self,
        id: &SendRecordId,
        status: DeliveryStatus,
    ) -> Result<SendRecord, DomainError>;

    /// Aggregate counts for a campaign, consistent with the record set at
    /// query time
    async fn campaign_summary(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<CampaignSummary, DomainError>;
}
