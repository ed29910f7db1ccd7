//! Customer classifier
//!
//! A deterministic decision table replacing the upstream system's habit of
//! delegating segmentation to a language model. Rules apply top-down; the
//! first match wins. Pure: the caller supplies the clock and the thresholds,
//! and persisting the derived segment is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Segment};

use super::{Customer, SpendTrend};

/// Numeric cutoffs for the decision table. The original product left these
/// implicit in a prompt; here they are configuration with sensible defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// Churn risk at or above which a dormant customer counts as lost
    pub lost_churn: f64,
    /// Churn risk at or above which a customer is at risk
    pub at_risk_churn: f64,
    /// Churn risk at or above which the tier is medium rather than low
    pub medium_churn: f64,
    /// Recency window (days) for a purchase to count as recent
    pub recent_days: i64,
    /// Recency (days) beyond which a customer is dormant
    pub dormant_days: i64,
    /// Tenure window (days) for the new-customer segment
    pub new_customer_days: i64,
    /// Tenure window (days) for the potential-loyalist segment
    pub potential_loyalist_days: i64,
    /// Tenure (days) at or above which loyalty applies
    pub loyal_tenure_days: i64,
    /// Externally supplied top-decile spend cutoff
    pub top_spend: f64,
    /// Sustained-spend cutoff for the loyalty segment
    pub sustained_spend: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            lost_churn: 0.8,
            at_risk_churn: 0.6,
            medium_churn: 0.3,
            recent_days: 30,
            dormant_days: 90,
            new_customer_days: 30,
            potential_loyalist_days: 180,
            loyal_tenure_days: 365,
            top_spend: 5000.0,
            sustained_spend: 1000.0,
        }
    }
}

/// Churn-risk tier derived alongside the segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChurnTier {
    Low,
    Medium,
    High,
}

/// Result of classifying one customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub segment: Segment,
    pub churn_tier: ChurnTier,
}

/// Classify a customer into a segment and churn tier.
///
/// Deterministic given identical inputs and thresholds. Rejects churn risk
/// outside [0,1] and last-purchase timestamps in the future rather than
/// silently correcting them.
pub fn classify(
    customer: &Customer,
    thresholds: &ClassifierThresholds,
    now: DateTime<Utc>,
) -> Result<Classification, DomainError> {
    customer.validate(now)?;

    let recency = customer.recency_days(now);
    let tenure = customer.tenure_days(now);

    let segment = if customer.churn_risk >= thresholds.lost_churn && recency > thresholds.dormant_days
    {
        Segment::Lost
    } else if customer.churn_risk >= thresholds.at_risk_churn {
        Segment::AtRisk
    } else if recency <= thresholds.recent_days && customer.total_spend >= thresholds.top_spend {
        Segment::Champion
    } else if tenure < thresholds.new_customer_days {
        Segment::NewCustomer
    } else if recency > thresholds.recent_days
        && recency <= thresholds.dormant_days
        && customer.spend_trend == SpendTrend::Falling
    {
        Segment::AboutToSleep
    } else if customer.spend_trend == SpendTrend::Rising
        && tenure < thresholds.potential_loyalist_days
    {
        Segment::PotentialLoyalist
    } else if tenure >= thresholds.loyal_tenure_days
        && customer.total_spend >= thresholds.sustained_spend
    {
        Segment::Loyalty
    } else {
        Segment::Referral
    };

    let churn_tier = if customer.churn_risk >= thresholds.at_risk_churn {
        ChurnTier::High
    } else if customer.churn_risk >= thresholds.medium_churn {
        ChurnTier::Medium
    } else {
        ChurnTier::Low
    };

    Ok(Classification {
        segment,
        churn_tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-06-01T00:00:00Z".parse().unwrap()
    }

    fn base_customer() -> Customer {
        Customer::new(7, "Ravi", "ravi@example.com", now() - Duration::days(400))
            .with_last_purchase(now() - Duration::days(10))
            .with_spend(500.0, 4)
    }

    #[test]
    fn test_high_churn_and_dormant_is_lost() {
        // Property: churn >= 0.8 and recency > 90 days always yields lost,
        // regardless of the other fields.
        for (churn, days, spend) in [(0.8, 91, 0.0), (0.9, 120, 9999.0), (1.0, 400, 50.0)] {
            let customer = base_customer()
                .with_churn_risk(churn)
                .with_last_purchase(now() - Duration::days(days))
                .with_spend(spend, 2);

            let result = classify(&customer, &ClassifierThresholds::default(), now()).unwrap();
            assert_eq!(result.segment, Segment::Lost, "churn={churn} days={days}");
            assert_eq!(result.churn_tier, ChurnTier::High);
        }
    }

    #[test]
    fn test_high_churn_but_recent_is_at_risk() {
        let customer = base_customer().with_churn_risk(0.85);
        let result = classify(&customer, &ClassifierThresholds::default(), now()).unwrap();
        assert_eq!(result.segment, Segment::AtRisk);
    }

    #[test]
    fn test_recent_top_spender_is_champion() {
        let customer = base_customer().with_spend(8000.0, 12).with_churn_risk(0.1);
        let result = classify(&customer, &ClassifierThresholds::default(), now()).unwrap();
        assert_eq!(result.segment, Segment::Champion);
        assert_eq!(result.churn_tier, ChurnTier::Low);
    }

    #[test]
    fn test_short_tenure_is_new_customer() {
        let customer = Customer::new(8, "Meera", "meera@example.com", now() - Duration::days(10))
            .with_last_purchase(now() - Duration::days(2))
            .with_churn_risk(0.1);

        let result = classify(&customer, &ClassifierThresholds::default(), now()).unwrap();
        assert_eq!(result.segment, Segment::NewCustomer);
    }

    #[test]
    fn test_fading_spender_is_about_to_sleep() {
        let customer = base_customer()
            .with_last_purchase(now() - Duration::days(60))
            .with_spend_trend(SpendTrend::Falling);

        let result = classify(&customer, &ClassifierThresholds::default(), now()).unwrap();
        assert_eq!(result.segment, Segment::AboutToSleep);
    }

    #[test]
    fn test_rising_spender_with_short_tenure_is_potential_loyalist() {
        let customer = Customer::new(9, "Divya", "divya@example.com", now() - Duration::days(90))
            .with_last_purchase(now() - Duration::days(40))
            .with_spend(300.0, 5)
            .with_spend_trend(SpendTrend::Rising);

        let result = classify(&customer, &ClassifierThresholds::default(), now()).unwrap();
        assert_eq!(result.segment, Segment::PotentialLoyalist);
    }

    #[test]
    fn test_long_tenure_sustained_spend_is_loyalty() {
        let customer = base_customer()
            .with_last_purchase(now() - Duration::days(45))
            .with_spend(2000.0, 20);

        let result = classify(&customer, &ClassifierThresholds::default(), now()).unwrap();
        assert_eq!(result.segment, Segment::Loyalty);
    }

    #[test]
    fn test_default_bucket_is_referral() {
        let customer = base_customer().with_last_purchase(now() - Duration::days(45));
        let result = classify(&customer, &ClassifierThresholds::default(), now()).unwrap();
        assert_eq!(result.segment, Segment::Referral);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let customer = base_customer().with_churn_risk(0.45);
        let thresholds = ClassifierThresholds::default();

        let first = classify(&customer, &thresholds, now()).unwrap();
        let second = classify(&customer, &thresholds, now()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.churn_tier, ChurnTier::Medium);
    }

    #[test]
    fn test_churn_out_of_range_is_rejected() {
        for churn in [-0.1, 1.1, f64::NAN] {
            let customer = base_customer().with_churn_risk(churn);
            let err = classify(&customer, &ClassifierThresholds::default(), now()).unwrap_err();
            assert!(matches!(err, DomainError::InvalidCustomerData { .. }));
        }
    }

    #[test]
    fn test_future_purchase_is_rejected() {
        let customer = base_customer().with_last_purchase(now() + Duration::days(3));
        let err = classify(&customer, &ClassifierThresholds::default(), now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCustomerData { .. }));
    }

    #[test]
    fn test_scenario_churn_090_dormant_120_days() {
        let customer = base_customer()
            .with_churn_risk(0.9)
            .with_last_purchase(now() - Duration::days(120));

        let result = classify(&customer, &ClassifierThresholds::default(), now()).unwrap();
        assert_eq!(result.segment, Segment::Lost);
    }

    #[test]
    fn test_scenario_low_churn_ten_day_tenure() {
        let customer = Customer::new(11, "Karan", "karan@example.com", now() - Duration::days(10))
            .with_churn_risk(0.1);

        let result = classify(&customer, &ClassifierThresholds::default(), now()).unwrap();
        assert_eq!(result.segment, Segment::NewCustomer);
    }

    #[test]
    fn test_missing_optional_fields_degrade_to_neutral() {
        // No last purchase, no trend: maximally stale, flat trend. With low
        // churn and long tenure this lands in the default referral bucket.
        let customer = Customer::new(12, "Nisha", "nisha@example.com", now() - Duration::days(200));
        let result = classify(&customer, &ClassifierThresholds::default(), now()).unwrap();
        assert_eq!(result.segment, Segment::Referral);
    }
}
