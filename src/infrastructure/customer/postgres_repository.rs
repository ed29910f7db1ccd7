//! PostgreSQL customer repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::{
    Customer, CustomerId, CustomerRepository, DomainError, Segment, SpendTrend,
};

const CUSTOMER_COLUMNS: &str = "customer_id, name, email, region, age, income, segment, \
     first_seen, last_purchase, total_spend, purchase_count, product_categories, \
     churn_risk, feedback_score, spend_trend";

/// PostgreSQL implementation of CustomerRepository against the externally
/// owned `crm` table
#[derive(Debug, Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn get(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM crm WHERE customer_id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get customer: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_customer(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Customer>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM crm ORDER BY customer_id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list customers: {}", e)))?;

        rows.iter().map(row_to_customer).collect()
    }

    async fn list_by_ids(&self, ids: &[CustomerId]) -> Result<Vec<Customer>, DomainError> {
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.value()).collect();

        let rows = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM crm WHERE customer_id = ANY($1) ORDER BY customer_id"
        ))
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list customers by ids: {}", e)))?;

        rows.iter().map(row_to_customer).collect()
    }

    async fn list_by_segment(&self, segment: Segment) -> Result<Vec<Customer>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM crm WHERE segment = $1 ORDER BY customer_id"
        ))
        .bind(segment.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list customers by segment: {}", e)))?;

        rows.iter().map(row_to_customer).collect()
    }

    async fn update_segment(
        &self,
        id: &CustomerId,
        segment: Segment,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE crm SET segment = $2 WHERE customer_id = $1")
            .bind(id.value())
            .bind(segment.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update segment: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("Customer {} not found", id)));
        }

        Ok(())
    }
}

fn row_to_customer(row: &PgRow) -> Result<Customer, DomainError> {
    let id: i64 = get(row, "customer_id")?;
    let name: String = get(row, "name")?;
    let email: String = get(row, "email")?;
    let first_seen: DateTime<Utc> = get(row, "first_seen")?;

    let segment = get::<Option<String>>(row, "segment")?
        .map(|label| label.parse::<Segment>())
        .transpose()?;

    let age: Option<i64> = get(row, "age")?;
    let purchase_count: i64 = get(row, "purchase_count")?;
    let trend: String = get(row, "spend_trend")?;

    let mut customer = Customer::new(id, name, email, first_seen);
    customer.region = get(row, "region")?;
    customer.age = age.map(|a| a as u32);
    customer.income = get(row, "income")?;
    customer.segment = segment;
    customer.last_purchase = get(row, "last_purchase")?;
    customer.total_spend = get(row, "total_spend")?;
    customer.purchase_count = purchase_count as u32;
    customer.product_categories = get(row, "product_categories")?;
    customer.churn_risk = get(row, "churn_risk")?;
    customer.feedback_score = get(row, "feedback_score")?;
    customer.spend_trend = SpendTrend::parse_lossy(&trend);

    Ok(customer)
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::storage(format!("Bad column '{}': {}", column, e)))
}
