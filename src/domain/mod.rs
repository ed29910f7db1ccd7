//! Domain layer: entities, decision logic, and collaborator contracts

pub mod campaign;
pub mod customer;
pub mod dispatch;
mod error;
pub mod notification;
pub mod rendering;
mod segment;
pub mod transport;

pub use campaign::{
    select_campaign, Campaign, CampaignDraft, CampaignId, CampaignRepository, CampaignStatus,
    CampaignType, MessageIntent,
};
pub use customer::{
    classify, Classification, ClassifierThresholds, ChurnTier, Customer, CustomerId,
    CustomerRepository, SpendTrend,
};
pub use dispatch::{
    CampaignSummary, DeliveryStatus, DispatchLedger, SendRecord, SendRecordId,
};
pub use error::DomainError;
pub use notification::{NotificationEvent, Notifier};
pub use rendering::{MessageRenderer, RenderedMessage};
pub use segment::Segment;
pub use transport::OutboundTransport;
