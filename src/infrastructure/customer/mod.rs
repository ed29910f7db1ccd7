//! Customer repository implementations

mod in_memory;
mod postgres_repository;

pub use in_memory::InMemoryCustomerRepository;
pub use postgres_repository::PostgresCustomerRepository;
