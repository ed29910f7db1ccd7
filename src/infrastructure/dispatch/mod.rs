//! Dispatch ledger implementations

mod in_memory;
mod postgres_ledger;

pub use in_memory::InMemoryDispatchLedger;
pub use postgres_ledger::PostgresDispatchLedger;
