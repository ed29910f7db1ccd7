//! Customer repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::{DomainError, Segment};

use super::{Customer, CustomerId};

/// Read/annotate access to the externally owned CRM customer table.
///
/// The engine never creates or deletes customers; the only write it performs
/// is persisting the derived segment label.
#[async_trait]
pub trait CustomerRepository: Send + Sync + Debug {
    /// Get a customer by ID
    async fn get(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError>;

    /// List all customers
    async fn list(&self) -> Result<Vec<Customer>, DomainError>;

    /// List customers by explicit IDs; missing IDs are skipped
    async fn list_by_ids(&self, ids: &[CustomerId]) -> Result<Vec<Customer>, DomainError>;

    /// List customers currently bearing a segment label
    async fn list_by_segment(&self, segment: Segment) -> Result<Vec<Customer>, DomainError>;

    /// Persist a derived segment label for a customer
    async fn update_segment(
        &self,
        id: &CustomerId,
        segment: Segment,
    ) -> Result<(), DomainError>;
}
