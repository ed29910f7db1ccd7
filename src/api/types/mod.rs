//! API request/response types

pub mod campaign;
pub mod classification;
pub mod error;

pub use campaign::{
    CampaignProposalResponse, CampaignResponse, CampaignsListResponse, CampaignSummaryResponse,
    CreateCampaignRequest, DispatchReportResponse,
};
pub use classification::{ClassifyRequest, ClassifyResponse};
pub use error::{ApiError, ApiErrorResponse};
