//! Canonical customer segments
//!
//! The nine behavioral cohorts a customer can belong to. Segments are derived
//! by the classifier decision table and map one-to-one onto the default
//! campaign type for a cohort.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Derived behavioral cohort label for a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Segment {
    /// Long tenure and sustained spend
    Loyalty,
    /// Default bucket: stable customers worth a referral nudge
    Referral,
    /// No purchase in a long time, manually targeted
    ReEngagement,
    /// High churn risk, still reachable
    AtRisk,
    /// Joined within the onboarding window
    NewCustomer,
    /// Recent purchase and top-decile spend
    Champion,
    /// Going quiet: recency between the recent and dormant windows
    AboutToSleep,
    /// High churn risk and long-dormant
    Lost,
    /// Rising spend early in the relationship
    PotentialLoyalist,
}

impl Segment {
    /// All nine canonical segments
    pub fn all() -> [Segment; 9] {
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

    /// Canonical kebab-case label, matching the CRM store's text column
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
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Segment {
    type Err = DomainError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|s| s.as_str() == label)
            .ok_or_else(|| DomainError::unknown_segment(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_labels_round_trip() {
        for segment in Segment::all() {
            let parsed: Segment = segment.as_str().parse().unwrap();
            assert_eq!(parsed, segment);
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = "vip".parse::<Segment>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownSegment { label } if label == "vip"));
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Segment::AboutToSleep).unwrap();
        assert_eq!(json, "\"about-to-sleep\"");

        let parsed: Segment = serde_json::from_str("\"potential-loyalist\"").unwrap();
        assert_eq!(parsed, Segment::PotentialLoyalist);
    }
}
