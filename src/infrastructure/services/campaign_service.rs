//! Campaign orchestration service
//!
//! Owns the campaign lifecycle end to end: proposing a draft from a
//! classified cohort, the human activation gate, dispatch through the
//! renderer and transport, and close-out. The dispatch ledger's uniqueness
//! claim is what keeps a crashed or repeated dispatch from double-sending.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    select_campaign, Campaign, CampaignId, CampaignRepository, CampaignStatus, CampaignSummary,
    CampaignType, Customer, CustomerRepository, DispatchLedger, DomainError, MessageIntent,
    MessageRenderer, NotificationEvent, Notifier, OutboundTransport, Segment, SendRecord,
    SendRecordId,
};

/// A persisted draft campaign together with the cohort it was proposed for
#[derive(Debug, Clone, Serialize)]
pub struct CampaignProposal {
    pub campaign: Campaign,
    pub intent: MessageIntent,
    pub targets: usize,
}

/// Outcome counts for one dispatch pass over a campaign's cohort
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Cohort size at dispatch time
    pub attempted: u64,
    /// Messages newly sent by this pass
    pub sent: u64,
    /// Customers skipped because the ledger already held their record
    pub already_sent: u64,
    /// Customers whose rendering or delivery failed this pass
    pub failed: u64,
}

#[derive(Debug)]
pub struct CampaignService {
    campaigns: Arc<dyn CampaignRepository>,
    customers: Arc<dyn CustomerRepository>,
    ledger: Arc<dyn DispatchLedger>,
    renderer: Arc<dyn MessageRenderer>,
    transport: Arc<dyn OutboundTransport>,
    notifier: Arc<dyn Notifier>,
}

impl CampaignService {
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        customers: Arc<dyn CustomerRepository>,
        ledger: Arc<dyn DispatchLedger>,
        renderer: Arc<dyn MessageRenderer>,
        transport: Arc<dyn OutboundTransport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            campaigns,
            customers,
            ledger,
            renderer,
            transport,
            notifier,
        }
    }

    /// Propose and persist a draft campaign for a segment's current cohort.
    ///
    /// The draft is never auto-activated; a human moves it to active via
    /// `activate`.
    pub async fn create_draft(
        &self,
        segment: Segment,
        override_type: Option<CampaignType>,
    ) -> Result<CampaignProposal, DomainError> {
        let cohort = self.customers.list_by_segment(segment).await?;
        let draft = select_campaign(segment, &cohort, override_type)?;

        let intent = draft.intent.clone();
        let targets = draft.target_customers.len();
        let campaign = self.campaigns.create(draft.into_campaign()).await?;

        info!(
            campaign_id = %campaign.id(),
            campaign_type = %campaign.campaign_type,
            targets,
            "campaign drafted"
        );

        self.notifier
            .notify(NotificationEvent::CampaignCreated {
                campaign_id: campaign.id().to_string(),
                name: campaign.name.clone(),
                campaign_type: campaign.campaign_type.to_string(),
                targets,
            })
            .await;

        Ok(CampaignProposal {
            campaign,
            intent,
            targets,
        })
    }

    pub async fn get(&self, id: &CampaignId) -> Result<Campaign, DomainError> {
        self.campaigns
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Campaign '{}' not found", id)))
    }

    pub async fn list(&self) -> Result<Vec<Campaign>, DomainError> {
        self.campaigns.list().await
    }

    /// Human approval gate: draft -> active
    pub async fn activate(&self, id: &CampaignId) -> Result<Campaign, DomainError> {
        let mut campaign = self.get(id).await?;
        campaign.activate()?;
        let campaign = self.campaigns.update(&campaign).await?;

        info!(campaign_id = %id, "campaign activated");
        Ok(campaign)
    }

    /// Close out an active campaign and post its final summary
    pub async fn complete(&self, id: &CampaignId) -> Result<Campaign, DomainError> {
        let mut campaign = self.get(id).await?;
        campaign.complete()?;
        let campaign = self.campaigns.update(&campaign).await?;

        let summary = self.ledger.campaign_summary(id).await?;
        info!(
            campaign_id = %id,
            sent = summary.sent,
            opened = summary.opened,
            failed = summary.failed,
            "campaign completed"
        );

        self.notifier
            .notify(NotificationEvent::CampaignCompleted {
                campaign_id: id.to_string(),
                name: campaign.name.clone(),
                summary,
            })
            .await;

        Ok(campaign)
    }

    /// Dispatch an active campaign to its target segment's current cohort.
    ///
    /// Safe to call again after a crash or partial failure: customers already
    /// in the ledger are skipped, and the ledger claim itself resolves any
    /// race. A unit failure (rendering, delivery) is counted and logged but
    /// never aborts the rest of the cohort.
    pub async fn dispatch(&self, id: &CampaignId) -> Result<DispatchReport, DomainError> {
        let campaign = self.get(id).await?;

        if campaign.status() != CampaignStatus::Active {
            return Err(DomainError::validation(format!(
                "Campaign '{}' is {}, only active campaigns can be dispatched",
                id,
                campaign.status()
            )));
        }

        let cohort = self
            .customers
            .list_by_segment(campaign.campaign_type.target_segment())
            .await?;
        let intent = MessageIntent::for_campaign_type(campaign.campaign_type);

        let mut report = DispatchReport {
            attempted: cohort.len() as u64,
            ..DispatchReport::default()
        };

        for customer in cohort {
            match self.dispatch_one(&campaign, &intent, &customer).await {
                Ok(DispatchOutcome::Sent) => report.sent += 1,
                Ok(DispatchOutcome::AlreadySent) => report.already_sent += 1,
                Ok(DispatchOutcome::Failed) => report.failed += 1,
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        campaign_id = %id,
                        customer_id = %customer.id(),
                        error = %e,
                        "dispatch unit failed"
                    );
                    self.notifier
                        .notify(NotificationEvent::ErrorOccurred {
                            context: format!(
                                "dispatch of campaign {} to customer {}",
                                id,
                                customer.id()
                            ),
                            message: e.to_string(),
                        })
                        .await;
                }
            }
        }

        info!(
            campaign_id = %id,
            attempted = report.attempted,
            sent = report.sent,
            already_sent = report.already_sent,
            failed = report.failed,
            "dispatch pass finished"
        );

        Ok(report)
    }

    /// Render, claim the ledger pair, then deliver.
    ///
    /// Claiming before delivery means a crash between the two steps loses at
    /// most one message rather than risking a duplicate.
    async fn dispatch_one(
        &self,
        campaign: &Campaign,
        intent: &MessageIntent,
        customer: &Customer,
    ) -> Result<DispatchOutcome, DomainError> {
        if self.ledger.find(campaign.id(), customer.id()).await?.is_some() {
            debug!(
                campaign_id = %campaign.id(),
                customer_id = %customer.id(),
                "customer already in ledger, skipping"
            );
            return Ok(DispatchOutcome::AlreadySent);
        }

        let message = self.renderer.render(intent, customer).await?;

        let record = SendRecord::new(
            campaign.id().clone(),
            *customer.id(),
            customer.email.clone(),
            message.subject.clone(),
            message.body.clone(),
        );

        let record = match self.ledger.record_send(record).await {
            Ok(record) => record,
            Err(e) if e.is_success_equivalent() => {
                debug!(
                    campaign_id = %campaign.id(),
                    customer_id = %customer.id(),
                    "lost the ledger race, another dispatcher sent this one"
                );
                return Ok(DispatchOutcome::AlreadySent);
            }
            Err(e) => return Err(e),
        };

        match self.transport.deliver(&customer.email, &message).await {
            Ok(crate::domain::DeliveryStatus::Sent) => Ok(DispatchOutcome::Sent),
            Ok(status) => {
                self.ledger.mark_outcome(record.id(), status).await?;
                Ok(DispatchOutcome::Failed)
            }
            Err(e) => {
                self.ledger
                    .mark_outcome(record.id(), crate::domain::DeliveryStatus::Failed)
                    .await?;
                warn!(
                    campaign_id = %campaign.id(),
                    customer_id = %customer.id(),
                    error = %e,
                    "delivery failed, outcome recorded"
                );
                Ok(DispatchOutcome::Failed)
            }
        }
    }

    /// Idempotent open flag driven by the external read-receipt signal
    pub async fn mark_opened(&self, id: &SendRecordId) -> Result<(), DomainError> {
        self.ledger.mark_opened(id).await?;
        Ok(())
    }

    /// Aggregate delivery counts for a campaign
    pub async fn summary(&self, id: &CampaignId) -> Result<CampaignSummary, DomainError> {
        // Surface NotFound for unknown campaigns instead of an empty summary
        self.get(id).await?;
        self.ledger.campaign_summary(id).await
    }
}

enum DispatchOutcome {
    Sent,
    AlreadySent,
    Failed,
}
