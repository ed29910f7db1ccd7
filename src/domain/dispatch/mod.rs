//! Dispatch domain: send records and the at-most-once ledger

mod entity;
mod ledger;

pub use entity::{CampaignSummary, DeliveryStatus, SendRecord, SendRecordId};
pub use ledger::DispatchLedger;
