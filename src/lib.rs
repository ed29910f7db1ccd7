//! CRM campaign engine
//!
//! Segments a CRM customer base with a deterministic decision table, drafts
//! one campaign per segment for human review, and dispatches approved
//! campaigns with an at-most-once delivery guarantee per
//! (campaign, customer) pair.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use api::state::AppState;
use domain::{
    CampaignRepository, CustomerRepository, DispatchLedger, MessageRenderer, Notifier,
    OutboundTransport,
};
use infrastructure::campaign::{InMemoryCampaignRepository, PostgresCampaignRepository};
use infrastructure::customer::{InMemoryCustomerRepository, PostgresCustomerRepository};
use infrastructure::dispatch::{InMemoryDispatchLedger, PostgresDispatchLedger};
use infrastructure::notification::{NoopNotifier, SlackNotifier};
use infrastructure::rendering::{HttpMessageRenderer, TemplateRenderer};
use infrastructure::services::{CampaignService, SegmentationService};
use infrastructure::transport::{HttpOutboundTransport, LogOutboundTransport};

/// Create the application state with all services wired up.
///
/// Every external collaborator degrades to a local stand-in when its
/// configuration is absent: in-memory stores without a database URL, the
/// template renderer without a rendering service, the log-only transport
/// without a mail gateway, and no notifications without a webhook.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let (customers, campaigns, ledger): (
        Arc<dyn CustomerRepository>,
        Arc<dyn CampaignRepository>,
        Arc<dyn DispatchLedger>,
    ) = match &config.database.url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            info!("Using Postgres repositories");

            (
                Arc::new(PostgresCustomerRepository::new(pool.clone())),
                Arc::new(PostgresCampaignRepository::new(pool.clone())),
                Arc::new(PostgresDispatchLedger::new(pool)),
            )
        }
        None => {
            info!("No database configured, using in-memory repositories");
            (
                Arc::new(InMemoryCustomerRepository::new()),
                Arc::new(InMemoryCampaignRepository::new()),
                Arc::new(InMemoryDispatchLedger::new()),
            )
        }
    };

    let renderer: Arc<dyn MessageRenderer> = match &config.renderer.base_url {
        Some(base_url) => Arc::new(HttpMessageRenderer::new(
            base_url.clone(),
            Duration::from_millis(config.renderer.timeout_ms),
        )),
        None => {
            info!("No rendering service configured, using the template renderer");
            Arc::new(TemplateRenderer::new())
        }
    };

    let transport: Arc<dyn OutboundTransport> = match &config.transport.base_url {
        Some(base_url) => Arc::new(HttpOutboundTransport::new(
            base_url.clone(),
            Duration::from_millis(config.transport.timeout_ms),
        )),
        None => {
            info!("No mail gateway configured, using the log-only transport");
            Arc::new(LogOutboundTransport::new())
        }
    };

    let notifier: Arc<dyn Notifier> = match &config.notifier.slack_webhook_url {
        Some(url) => Arc::new(SlackNotifier::new(url.clone())),
        None => Arc::new(NoopNotifier::new()),
    };

    let segmentation = Arc::new(SegmentationService::new(
        customers.clone(),
        config.thresholds.clone(),
    ));
    let campaign_service = Arc::new(CampaignService::new(
        campaigns, customers, ledger, renderer, transport, notifier,
    ));

    Ok(AppState::new(segmentation, campaign_service))
}
