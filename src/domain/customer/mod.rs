//! Customer domain: records, classification, repository

mod classifier;
mod entity;
mod repository;

pub use classifier::{classify, Classification, ClassifierThresholds, ChurnTier};
pub use entity::{Customer, CustomerId, SpendTrend};
pub use repository::CustomerRepository;
