//! Segmentation endpoints

use axum::{extract::State, Json};

use crate::api::state::AppState;
use crate::api::types::{ApiError, ClassifyRequest, ClassifyResponse};
use crate::domain::CustomerId;

/// POST /v1/segments/classify - classify customers and persist their segments
///
/// With `customer_ids` the pass covers only those customers; without it the
/// whole base. Rejected units are reported inline, never as a request error.
pub async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let results = match request.customer_ids {
        Some(ids) => {
            let ids: Vec<CustomerId> = ids.into_iter().map(CustomerId::new).collect();
            state.segmentation.classify_ids(&ids).await?
        }
        None => state.segmentation.classify_all().await?,
    };

    Ok(Json(ClassifyResponse::from_results(results)))
}
