//! In-memory customer repository

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{Customer, CustomerId, CustomerRepository, DomainError, Segment};

/// In-memory implementation backed by a map. Used by tests and by
/// database-less runs.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository (the CRM platform owns customer creation; this
    /// stands in for it in tests)
    #[cfg(test)]
    pub fn seed(&self, customers: impl IntoIterator<Item = Customer>) {
        let mut map = self.customers.write().expect("customer map poisoned");
        for customer in customers {
            map.insert(*customer.id(), customer);
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn get(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        let customers = self
            .customers
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(customers.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Customer>, DomainError> {
        let customers = self
            .customers
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        let mut all: Vec<_> = customers.values().cloned().collect();
        all.sort_by_key(|c| c.id().value());
        Ok(all)
    }

    async fn list_by_ids(&self, ids: &[CustomerId]) -> Result<Vec<Customer>, DomainError> {
        let customers = self
            .customers
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(ids.iter().filter_map(|id| customers.get(id).cloned()).collect())
    }

    async fn list_by_segment(&self, segment: Segment) -> Result<Vec<Customer>, DomainError> {
        let customers = self
            .customers
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        let mut matching: Vec<_> = customers
            .values()
            .filter(|c| c.segment == Some(segment))
            .cloned()
            .collect();
        matching.sort_by_key(|c| c.id().value());
        Ok(matching)
    }

    async fn update_segment(
        &self,
        id: &CustomerId,
        segment: Segment,
    ) -> Result<(), DomainError> {
        let mut customers = self
            .customers
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        match customers.get_mut(id) {
            Some(customer) => {
                customer.segment = Some(segment);
                Ok(())
            }
            None => Err(DomainError::not_found(format!(
                "Customer {} not found",
                id
            ))),
        }
    }
}
