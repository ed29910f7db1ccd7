//! Send record endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::SendRecordId;

/// POST /v1/sends/:send_id/opened - read-receipt signal from the tracking
/// pixel. Idempotent: repeats return the same success.
pub async fn mark_opened(
    State(state): State<AppState>,
    Path(send_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = SendRecordId::new(send_id)?;
    state.campaigns.mark_opened(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
