//! Segmentation API request/response types

use serde::{Deserialize, Serialize};

use crate::infrastructure::services::CohortClassification;

/// POST /v1/segments/classify request body. No IDs means the whole base.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub customer_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyResponse {
    pub classified: usize,
    pub rejected: usize,
    pub results: Vec<CohortClassification>,
}

impl ClassifyResponse {
    pub fn from_results(results: Vec<CohortClassification>) -> Self {
        let rejected = results.iter().filter(|r| r.error.is_some()).count();
        Self {
            classified: results.len() - rejected,
            rejected,
            results,
        }
    }
}
