//! Campaign repository implementations

mod in_memory;
mod postgres_repository;

pub use in_memory::InMemoryCampaignRepository;
pub use postgres_repository::PostgresCampaignRepository;
