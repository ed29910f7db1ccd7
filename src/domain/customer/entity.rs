//! Customer domain entities
//!
//! Customer records are externally owned by the e-commerce platform. The
//! engine reads them and writes back exactly one derived field: the segment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Segment};

/// Stable customer identifier, matching the CRM store's bigint key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for CustomerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a customer's recent spend, supplied by upstream analytics.
/// Unknown defaults to flat so classification degrades instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendTrend {
    Rising,
    #[default]
    Flat,
    Falling,
}

impl SpendTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Flat => "flat",
            Self::Falling => "falling",
        }
    }

    /// Parse a trend label, degrading unknown values to the neutral default
    pub fn parse_lossy(label: &str) -> Self {
        match label {
            "rising" => Self::Rising,
            "falling" => Self::Falling,
            _ => Self::Flat,
        }
    }
}

/// A CRM customer record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    pub name: String,
    pub email: String,
    pub region: Option<String>,
    pub age: Option<u32>,
    pub income: Option<i64>,
    /// Derived segment, recomputed on demand by the classifier
    pub segment: Option<Segment>,
    /// When the customer first appeared; tenure basis
    pub first_seen: DateTime<Utc>,
    pub last_purchase: Option<DateTime<Utc>>,
    pub total_spend: f64,
    pub purchase_count: u32,
    pub product_categories: Vec<String>,
    /// Likelihood the customer stops purchasing, in [0, 1]
    pub churn_risk: f64,
    pub feedback_score: Option<f64>,
    pub spend_trend: SpendTrend,
}

impl Customer {
    /// Create a new customer record
    pub fn new(
        id: impl Into<CustomerId>,
        name: impl Into<String>,
        email: impl Into<String>,
        first_seen: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            region: None,
            age: None,
            income: None,
            segment: None,
            first_seen,
            last_purchase: None,
            total_spend: 0.0,
            purchase_count: 0,
            product_categories: Vec::new(),
            churn_risk: 0.0,
            feedback_score: None,
            spend_trend: SpendTrend::default(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_last_purchase(mut self, at: DateTime<Utc>) -> Self {
        self.last_purchase = Some(at);
        self
    }

    pub fn with_spend(mut self, total_spend: f64, purchase_count: u32) -> Self {
        self.total_spend = total_spend;
        self.purchase_count = purchase_count;
        self
    }

    pub fn with_churn_risk(mut self, churn_risk: f64) -> Self {
        self.churn_risk = churn_risk;
        self
    }

    pub fn with_spend_trend(mut self, trend: SpendTrend) -> Self {
        self.spend_trend = trend;
        self
    }

    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segment = Some(segment);
        self
    }

    pub fn with_product_categories(mut self, categories: Vec<String>) -> Self {
        self.product_categories = categories;
        self
    }

    pub fn with_feedback_score(mut self, score: f64) -> Self {
        self.feedback_score = Some(score);
        self
    }

    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    /// Days since the last purchase. No purchase on record means the customer
    /// is maximally stale.
    pub fn recency_days(&self, now: DateTime<Utc>) -> i64 {
        match self.last_purchase {
            Some(at) => (now - at).num_days(),
            None => i64::MAX,
        }
    }

    /// Days since the customer first appeared
    pub fn tenure_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.first_seen).num_days()
    }

    /// Validate the behavioral fields the classifier depends on. Bad data is
    /// rejected verbatim, never clamped.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !(0.0..=1.0).contains(&self.churn_risk) {
            return Err(DomainError::invalid_customer_data(format!(
                "customer {}: churn_risk {} outside [0,1]",
                self.id, self.churn_risk
            )));
        }

        if let Some(at) = self.last_purchase {
            if at > now {
                return Err(DomainError::invalid_customer_data(format!(
                    "customer {}: last_purchase {} is in the future",
                    self.id, at
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-06-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_recency_without_purchase_is_max() {
        let customer = Customer::new(1, "Asha", "asha@example.com", now() - Duration::days(200));
        assert_eq!(customer.recency_days(now()), i64::MAX);
    }

    #[test]
    fn test_tenure_days() {
        let customer = Customer::new(1, "Asha", "asha@example.com", now() - Duration::days(45));
        assert_eq!(customer.tenure_days(now()), 45);
    }

    #[test]
    fn test_validate_rejects_out_of_range_churn() {
        let customer = Customer::new(1, "Asha", "asha@example.com", now()).with_churn_risk(1.4);
        let err = customer.validate(now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCustomerData { .. }));
    }

    #[test]
    fn test_validate_rejects_future_purchase() {
        let customer = Customer::new(1, "Asha", "asha@example.com", now())
            .with_last_purchase(now() + Duration::days(1));
        let err = customer.validate(now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCustomerData { .. }));
    }

    #[test]
    fn test_spend_trend_parse_lossy() {
        assert_eq!(SpendTrend::parse_lossy("rising"), SpendTrend::Rising);
        assert_eq!(SpendTrend::parse_lossy("falling"), SpendTrend::Falling);
        assert_eq!(SpendTrend::parse_lossy("sideways"), SpendTrend::Flat);
    }
}
