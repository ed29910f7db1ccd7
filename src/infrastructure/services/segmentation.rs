//! Cohort segmentation service
//!
//! Batch-classifies customers and persists the derived segments. Each
//! customer is an independent unit: bad data on one is reported for that one
//! and never aborts the rest, and an abandoned batch leaves every
//! already-persisted segment valid.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{
    classify, ChurnTier, ClassifierThresholds, Customer, CustomerId, CustomerRepository,
    DomainError, Segment,
};

/// Per-customer classification outcome
#[derive(Debug, Clone, Serialize)]
pub struct CohortClassification {
    pub customer_id: CustomerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<Segment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub churn_tier: Option<ChurnTier>,
    /// Verbatim error for units the classifier rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct SegmentationService {
    customers: Arc<dyn CustomerRepository>,
    thresholds: ClassifierThresholds,
}

impl SegmentationService {
    pub fn new(customers: Arc<dyn CustomerRepository>, thresholds: ClassifierThresholds) -> Self {
        Self {
            customers,
            thresholds,
        }
    }

    /// Classify every customer in the store
    pub async fn classify_all(&self) -> Result<Vec<CohortClassification>, DomainError> {
        let cohort = self.customers.list().await?;
        Ok(self.classify_cohort(cohort).await)
    }

    /// Classify an explicit set of customers
    pub async fn classify_ids(
        &self,
        ids: &[CustomerId],
    ) -> Result<Vec<CohortClassification>, DomainError> {
        let cohort = self.customers.list_by_ids(ids).await?;
        Ok(self.classify_cohort(cohort).await)
    }

    async fn classify_cohort(&self, cohort: Vec<Customer>) -> Vec<CohortClassification> {
        let now = Utc::now();
        let mut results = Vec::with_capacity(cohort.len());

        for customer in cohort {
            let customer_id = *customer.id();

            match classify(&customer, &self.thresholds, now) {
                Ok(classification) => {
                    debug!(%customer_id, segment = %classification.segment, "classified customer");

                    let outcome = match self
                        .customers
                        .update_segment(&customer_id, classification.segment)
                        .await
                    {
                        Ok(()) => CohortClassification {
                            customer_id,
                            segment: Some(classification.segment),
                            churn_tier: Some(classification.churn_tier),
                            error: None,
                        },
                        Err(e) => CohortClassification {
                            customer_id,
                            segment: None,
                            churn_tier: None,
                            error: Some(e.to_string()),
                        },
                    };
                    results.push(outcome);
                }
                Err(e) => {
                    warn!(%customer_id, error = %e, "classification rejected customer data");
                    results.push(CohortClassification {
                        customer_id,
                        segment: None,
                        churn_tier: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::customer::InMemoryCustomerRepository;
    use chrono::Duration;

    fn service_with(customers: Vec<Customer>) -> (SegmentationService, Arc<InMemoryCustomerRepository>) {
        let repo = Arc::new(InMemoryCustomerRepository::new());
        repo.seed(customers);
        let service = SegmentationService::new(repo.clone(), ClassifierThresholds::default());
        (service, repo)
    }

    #[tokio::test]
    async fn test_classifies_and_persists_segments() {
        let now = Utc::now();
        let (service, repo) = service_with(vec![
            Customer::new(1, "Asha", "asha@example.com", now - Duration::days(400))
                .with_churn_risk(0.9)
                .with_last_purchase(now - Duration::days(120)),
            Customer::new(2, "Ravi", "ravi@example.com", now - Duration::days(10))
                .with_churn_risk(0.1),
        ]);

        let results = service.classify_all().await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].segment, Some(Segment::Lost));
        assert_eq!(results[1].segment, Some(Segment::NewCustomer));

        let stored = repo.get(&CustomerId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.segment, Some(Segment::Lost));
    }

    #[tokio::test]
    async fn test_bad_unit_does_not_abort_batch() {
        let now = Utc::now();
        let (service, repo) = service_with(vec![
            Customer::new(1, "Asha", "asha@example.com", now - Duration::days(400))
                .with_churn_risk(2.0),
            Customer::new(2, "Ravi", "ravi@example.com", now - Duration::days(10))
                .with_churn_risk(0.1),
        ]);

        let results = service.classify_all().await.unwrap();
        assert_eq!(results.len(), 2);

        let bad = results.iter().find(|r| r.customer_id.value() == 1).unwrap();
        assert!(bad.error.as_deref().unwrap().contains("churn_risk"));
        assert!(bad.segment.is_none());

        let good = results.iter().find(|r| r.customer_id.value() == 2).unwrap();
        assert_eq!(good.segment, Some(Segment::NewCustomer));

        // The rejected customer keeps whatever segment it had
        let stored = repo.get(&CustomerId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.segment, None);
    }

    #[tokio::test]
    async fn test_classify_ids_only_touches_requested() {
        let now = Utc::now();
        let (service, _repo) = service_with(vec![
            Customer::new(1, "Asha", "asha@example.com", now - Duration::days(10)),
            Customer::new(2, "Ravi", "ravi@example.com", now - Duration::days(10)),
        ]);

        let results = service.classify_ids(&[CustomerId::new(2)]).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].customer_id, CustomerId::new(2));
    }
}
