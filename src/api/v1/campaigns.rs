//! Campaign lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, CampaignProposalResponse, CampaignResponse, CampaignsListResponse,
    CampaignSummaryResponse, CreateCampaignRequest, DispatchReportResponse,
};
use crate::domain::CampaignId;

/// POST /v1/campaigns - draft a campaign for a segment's current cohort
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let proposal = state
        .campaigns
        .create_draft(request.segment, request.campaign_type)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CampaignProposalResponse::from(proposal)),
    ))
}

/// GET /v1/campaigns - list all campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
) -> Result<Json<CampaignsListResponse>, ApiError> {
    let campaigns = state.campaigns.list().await?;

    Ok(Json(CampaignsListResponse {
        campaigns: campaigns.into_iter().map(CampaignResponse::from).collect(),
    }))
}

/// GET /v1/campaigns/:campaign_id - get a campaign by ID
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<CampaignResponse>, ApiError> {
    let id = CampaignId::new(campaign_id)?;
    let campaign = state.campaigns.get(&id).await?;

    Ok(Json(CampaignResponse::from(campaign)))
}

/// POST /v1/campaigns/:campaign_id/activate - human approval gate
pub async fn activate_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<CampaignResponse>, ApiError> {
    let id = CampaignId::new(campaign_id)?;
    let campaign = state.campaigns.activate(&id).await?;

    Ok(Json(CampaignResponse::from(campaign)))
}

/// POST /v1/campaigns/:campaign_id/dispatch - send to the target cohort
pub async fn dispatch_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<DispatchReportResponse>, ApiError> {
    let id = CampaignId::new(campaign_id)?;
    let report = state.campaigns.dispatch(&id).await?;

    Ok(Json(DispatchReportResponse::from(report)))
}

/// POST /v1/campaigns/:campaign_id/complete - close out a campaign
pub async fn complete_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<CampaignResponse>, ApiError> {
    let id = CampaignId::new(campaign_id)?;
    let campaign = state.campaigns.complete(&id).await?;

    Ok(Json(CampaignResponse::from(campaign)))
}

/// GET /v1/campaigns/:campaign_id/summary - delivery counts
pub async fn campaign_summary(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<CampaignSummaryResponse>, ApiError> {
    let id = CampaignId::new(campaign_id)?;
    let summary = state.campaigns.summary(&id).await?;

    Ok(Json(CampaignSummaryResponse::new(id.as_str(), summary)))
}
