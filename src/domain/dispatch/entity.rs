//! Send records: the dispatch ledger's unit of truth

use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::campaign::CampaignId;
use crate::domain::customer::CustomerId;
use crate::domain::DomainError;

/// Regex pattern for valid send record IDs: send-{uuid}
static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^send-[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}$").unwrap()
});

/// Validated send record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SendRecordId(String);

impl SendRecordId {
    /// Create a new validated send record ID
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if !ID_PATTERN.is_match(&id) {
            return Err(DomainError::invalid_id(format!(
                "Invalid send record ID '{}': must be in format send-{{uuid}}",
                id
            )));
        }

        Ok(Self(id))
    }

    /// Generate a new send record ID
    pub fn generate() -> Self {
        Self(format!("send-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SendRecordId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SendRecordId> for String {
    fn from(id: SendRecordId) -> Self {
        id.0
    }
}

impl fmt::Display for SendRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome reported by the outbound transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
    Bounced,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Bounced => "bounced",
        }
    }

    pub fn parse(label: &str) -> Result<Self, DomainError> {
        match label {
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            "bounced" => Ok(Self::Bounced),
            other => Err(DomainError::validation(format!(
                "'{}' is not a delivery status",
                other
            ))),
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One campaign message sent to one customer. At most one of these exists per
/// (campaign, customer) pair; the ledger enforces that as a constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRecord {
    id: SendRecordId,
    pub campaign_id: CampaignId,
    pub customer_id: CustomerId,
    /// Recipient address at send time
    pub email: String,
    pub subject: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    status: DeliveryStatus,
    /// Set only by the external read-receipt signal, never by the engine
    opened: bool,
}

impl SendRecord {
    /// Create a new record with status `sent`
    pub fn new(
        campaign_id: CampaignId,
        customer_id: CustomerId,
        email: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: SendRecordId::generate(),
            campaign_id,
            customer_id,
            email: email.into(),
            subject: subject.into(),
            body: body.into(),
            sent_at: Utc::now(),
            status: DeliveryStatus::Sent,
            opened: false,
        }
    }

    /// Rehydrate a record from storage
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: SendRecordId,
        campaign_id: CampaignId,
        customer_id: CustomerId,
        email: String,
        subject: String,
        body: String,
        sent_at: DateTime<Utc>,
        status: DeliveryStatus,
        opened: bool,
    ) -> Self {
        Self {
            id,
            campaign_id,
            customer_id,
            email,
            subject,
            body,
            sent_at,
            status,
            opened,
        }
    }

    pub fn id(&self) -> &SendRecordId {
        &self.id
    }

    pub fn status(&self) -> DeliveryStatus {
        self.status
    }

    pub fn opened(&self) -> bool {
        self.opened
    }

    /// One-way open flag. Re-marking an already-opened record is a no-op.
    pub fn mark_opened(&mut self) {
        self.opened = true;
    }

    /// Record the transport's delivery outcome
    pub fn set_status(&mut self, status: DeliveryStatus) {
        self.status = status;
    }
}

/// Read-only aggregate over a campaign's send records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSummary {
    /// Records with delivery status `sent`
    pub sent: u64,
    /// Records flagged opened by the read-receipt signal
    pub opened: u64,
    /// Records with delivery status `failed` or `bounced`
    pub failed: u64,
}

impl CampaignSummary {
    pub fn add_record(&mut self, record: &SendRecord) {
        match record.status() {
            DeliveryStatus::Sent => self.sent += 1,
            DeliveryStatus::Failed | DeliveryStatus::Bounced => self.failed += 1,
        }

        if record.opened() {
            self.opened += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SendRecord {
        SendRecord::new(
            CampaignId::generate(),
            CustomerId::new(42),
            "asha@example.com",
            "We miss you!",
            "<p>Hi Asha</p>",
        )
    }

    #[test]
    fn test_new_record_is_sent_and_unopened() {
        let record = record();
        assert_eq!(record.status(), DeliveryStatus::Sent);
        assert!(!record.opened());
    }

    #[test]
    fn test_mark_opened_is_idempotent() {
        let mut record = record();
        record.mark_opened();
        record.mark_opened();
        assert!(record.opened());
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = CampaignSummary::default();

        let sent = record();
        let mut opened = record();
        opened.mark_opened();
        let mut failed = record();
        failed.set_status(DeliveryStatus::Failed);
        let mut bounced = record();
        bounced.set_status(DeliveryStatus::Bounced);

        for r in [&sent, &opened, &failed, &bounced] {
            summary.add_record(r);
        }

        assert_eq!(summary.sent, 2);
        assert_eq!(summary.opened, 1);
        assert_eq!(summary.failed, 2);
    }

    #[test]
    fn test_malformed_send_id_rejected() {
        assert!(SendRecordId::new("send-abc").is_err());
        assert!(SendRecordId::new("camp-00000000-0000-0000-0000-000000000000").is_err());
    }
}
