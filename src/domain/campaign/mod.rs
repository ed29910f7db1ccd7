//! Campaign domain: types, drafts, selection, repository

mod draft;
mod entity;
mod repository;
mod selector;

pub use draft::{CampaignDraft, MessageIntent};
pub use entity::{Campaign, CampaignId, CampaignStatus, CampaignType};
pub use repository::CampaignRepository;
pub use selector::select_campaign;
