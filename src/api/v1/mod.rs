//! v1 API endpoints

pub mod campaigns;
pub mod segments;
pub mod sends;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/segments/classify", post(segments::classify))
        .route(
            "/campaigns",
            post(campaigns::create_campaign).get(campaigns::list_campaigns),
        )
        .route("/campaigns/{campaign_id}", get(campaigns::get_campaign))
        .route(
            "/campaigns/{campaign_id}/activate",
            post(campaigns::activate_campaign),
        )
        .route(
            "/campaigns/{campaign_id}/dispatch",
            post(campaigns::dispatch_campaign),
        )
        .route(
            "/campaigns/{campaign_id}/complete",
            post(campaigns::complete_campaign),
        )
        .route(
            "/campaigns/{campaign_id}/summary",
            get(campaigns::campaign_summary),
        )
        .route("/sends/{send_id}/opened", post(sends::mark_opened))
}
