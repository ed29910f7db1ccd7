//! Campaign domain entities

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Segment};

/// Regex pattern for valid campaign IDs: camp-{uuid}
static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^camp-[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}$").unwrap()
});

/// Validated campaign identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CampaignId(String);

impl CampaignId {
    /// Create a new validated campaign ID
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if !ID_PATTERN.is_match(&id) {
            return Err(DomainError::invalid_id(format!(
                "Invalid campaign ID '{}': must be in format camp-{{uuid}}",
                id
            )));
        }

        Ok(Self(id))
    }

    /// Generate a new campaign ID
    pub fn generate() -> Self {
        Self(format!("camp-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CampaignId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CampaignId> for String {
    fn from(id: CampaignId) -> Self {
        id.0
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The nine canonical campaign types. Fixed at design time; one per segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CampaignType {
    /// Thank high-value customers for their loyalty
    Loyalty,
    /// Encourage high-value customers to refer others with a discount
    Referral,
    /// Target customers who have not purchased in a long time
    ReEngagement,
    /// Target customers likely to churn
    AtRisk,
    /// Welcome and onboard new customers
    NewCustomer,
    /// Reward your best customers
    Champion,
    /// Re-activate customers who are becoming inactive
    AboutToSleep,
    /// Attempt to win back lost customers
    Lost,
    /// Nurture promising new customers
    PotentialLoyalist,
}

impl CampaignType {
    pub fn all() -> [CampaignType; 9] {
        [
            Self::Loyalty,
            Self::Referral,
            Self::ReEngagement,
            Self::AtRisk,
            Self::NewCustomer,
            Self::Champion,
            Self::AboutToSleep,
            Self::Lost,
            Self::PotentialLoyalist,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loyalty => "loyalty",
            Self::Referral => "referral",
            Self::ReEngagement => "re-engagement",
            Self::AtRisk => "at-risk",
            Self::NewCustomer => "new-customer",
            Self::Champion => "champion",
            Self::AboutToSleep => "about-to-sleep",
            Self::Lost => "lost",
            Self::PotentialLoyalist => "potential-loyalist",
        }
    }

    /// The segment this campaign type targets (inverse of the default
    /// segment-to-type mapping)
    pub fn target_segment(&self) -> Segment {
        match self {
            Self::Loyalty => Segment::Loyalty,
            Self::Referral => Segment::Referral,
            Self::ReEngagement => Segment::ReEngagement,
            Self::AtRisk => Segment::AtRisk,
            Self::NewCustomer => Segment::NewCustomer,
            Self::Champion => Segment::Champion,
            Self::AboutToSleep => Segment::AboutToSleep,
            Self::Lost => Segment::Lost,
            Self::PotentialLoyalist => Segment::PotentialLoyalist,
        }
    }
}

/// Default one-to-one mapping from a segment to its campaign type
impl From<Segment> for CampaignType {
    fn from(segment: Segment) -> Self {
        match segment {
            Segment::Loyalty => Self::Loyalty,
            Segment::Referral => Self::Referral,
            Segment::ReEngagement => Self::ReEngagement,
            Segment::AtRisk => Self::AtRisk,
            Segment::NewCustomer => Self::NewCustomer,
            Segment::Champion => Self::Champion,
            Segment::AboutToSleep => Self::AboutToSleep,
            Segment::Lost => Self::Lost,
            Segment::PotentialLoyalist => Self::PotentialLoyalist,
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CampaignType {
    type Err = DomainError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|t| t.as_str() == label)
            .ok_or_else(|| {
                DomainError::validation(format!("'{}' is not a campaign type", label))
            })
    }
}

/// Campaign lifecycle status. Forward-only: draft -> active -> completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    /// Proposed and awaiting human review
    #[default]
    Draft,

    /// Approved and eligible for dispatch
    Active,

    /// Closed out; no further sends
    Completed,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Check whether this status may move to `target`. Transitions are
    /// monotonic; there is no path back to draft.
    pub fn can_transition_to(&self, target: CampaignStatus) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Active) | (Self::Active, Self::Completed)
        )
    }

    pub fn parse(label: &str) -> Result<Self, DomainError> {
        match label {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(DomainError::validation(format!(
                "'{}' is not a campaign status",
                other
            ))),
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A marketing campaign owned by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    id: CampaignId,
    pub name: String,
    pub campaign_type: CampaignType,
    pub description: String,
    status: CampaignStatus,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// Create a new campaign in draft status
    pub fn new(
        name: impl Into<String>,
        campaign_type: CampaignType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: CampaignId::generate(),
            name: name.into(),
            campaign_type,
            description: description.into(),
            status: CampaignStatus::Draft,
            created_at: Utc::now(),
        }
    }

    /// Rehydrate a campaign from storage
    pub fn from_parts(
        id: CampaignId,
        name: String,
        campaign_type: CampaignType,
        description: String,
        status: CampaignStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            campaign_type,
            description,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> &CampaignId {
        &self.id
    }

    pub fn status(&self) -> CampaignStatus {
        self.status
    }

    /// Move the campaign forward one status. Fails on any non-forward step.
    pub fn transition_to(&mut self, target: CampaignStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::invalid_transition(
                self.status.as_str(),
                target.as_str(),
            ));
        }

        self.status = target;
        Ok(())
    }

    /// Human approval gate: draft -> active
    pub fn activate(&mut self) -> Result<(), DomainError> {
        self.transition_to(CampaignStatus::Active)
    }

    /// Close out: active -> completed
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition_to(CampaignStatus::Completed)
    }
}
