//! PostgreSQL dispatch ledger implementation
//!
//! Atomicity of the duplicate check comes from the unique constraint on
//! (campaign_id, customer_id) in `campaigning_emails`; the insert either
//! claims the pair or fails, with no check-then-insert window.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::{
    CampaignId, CampaignSummary, CustomerId, DeliveryStatus, DispatchLedger, DomainError,
    SendRecord, SendRecordId,
};

const SEND_COLUMNS: &str =
    "id, campaign_id, customer_id, email, subject, body, sent_at, status, opened";

/// PostgreSQL implementation of the dispatch ledger
#[derive(Debug, Clone)]
pub struct PostgresDispatchLedger {
    pool: PgPool,
}

impl PostgresDispatchLedger {
    /// Create a new ledger with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: &SendRecordId) -> Result<SendRecord, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {SEND_COLUMNS} FROM campaigning_emails WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get send record: {}", e)))?;

        match row {
            Some(row) => row_to_send_record(&row),
            None => Err(DomainError::not_found(format!(
                "Send record '{}' not found",
                id
            ))),
        }
    }
}

#[async_trait]
impl DispatchLedger for PostgresDispatchLedger {
    async fn record_send(&self, record: SendRecord) -> Result<SendRecord, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO campaigning_emails
                (id, campaign_id, customer_id, email, subject, body, sent_at, status, opened)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.id().as_str())
        .bind(record.campaign_id.as_str())
        .bind(record.customer_id.value())
        .bind(&record.email)
        .bind(&record.subject)
        .bind(&record.body)
        .bind(record.sent_at)
        .bind(record.status().as_str())
        .bind(record.opened())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("campaigning_emails_campaign_customer_key")
                || msg.contains("duplicate key")
            {
                DomainError::duplicate_send(
                    record.campaign_id.as_str(),
                    record.customer_id.value(),
                )
            } else {
                DomainError::storage(format!("Failed to record send: {}", e))
            }
        })?;

        Ok(record)
    }

    async fn get(&self, id: &SendRecordId) -> Result<Option<SendRecord>, DomainError> {
        match self.fetch(id).await {
            Ok(record) => Ok(Some(record)),
            Err(DomainError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn find(
        &self,
        campaign_id: &CampaignId,
        customer_id: &CustomerId,
    ) -> Result<Option<SendRecord>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {SEND_COLUMNS} FROM campaigning_emails \
             WHERE campaign_id = $1 AND customer_id = $2"
        ))
        .bind(campaign_id.as_str())
        .bind(customer_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find send record: {}", e)))?;

        row.as_ref().map(row_to_send_record).transpose()
    }

    async fn list_by_campaign(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<Vec<SendRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {SEND_COLUMNS} FROM campaigning_emails \
             WHERE campaign_id = $1 ORDER BY sent_at"
        ))
        .bind(campaign_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list send records: {}", e)))?;

        rows.iter().map(row_to_send_record).collect()
    }

    async fn mark_opened(&self, id: &SendRecordId) -> Result<SendRecord, DomainError> {
        // Idempotent by construction: setting opened = true twice is the
        // same row state.
        let result = sqlx::query("UPDATE campaigning_emails SET opened = true WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to mark opened: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Send record '{}' not found",
                id
            )));
        }

        self.fetch(id).await
    }

    async fn mark_outcome(
        &self,
        id: &SendRecordId,
        status: DeliveryStatus,
    ) -> Result<SendRecord, DomainError> {
        let result = sqlx::query("UPDATE campaigning_emails SET status = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to mark outcome: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Send record '{}' not found",
                id
            )));
        }

        self.fetch(id).await
    }

    async fn campaign_summary(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<CampaignSummary, DomainError> {
        // One statement, one snapshot: no partial reads across concurrent
        // writers.
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'sent')                  AS sent,
                COUNT(*) FILTER (WHERE opened)                           AS opened,
                COUNT(*) FILTER (WHERE status IN ('failed', 'bounced'))  AS failed
            FROM campaigning_emails
            WHERE campaign_id = $1
            "#,
        )
        .bind(campaign_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to summarize campaign: {}", e)))?;

        let sent: i64 = row
            .try_get("sent")
            .map_err(|e| DomainError::storage(format!("Bad column 'sent': {}", e)))?;
        let opened: i64 = row
            .try_get("opened")
            .map_err(|e| DomainError::storage(format!("Bad column 'opened': {}", e)))?;
        let failed: i64 = row
            .try_get("failed")
            .map_err(|e| DomainError::storage(format!("Bad column 'failed': {}", e)))?;

        Ok(CampaignSummary {
            sent: sent as u64,
            opened: opened as u64,
            failed: failed as u64,
        })
    }
}

fn row_to_send_record(row: &PgRow) -> Result<SendRecord, DomainError> {
    let id: String = column(row, "id")?;
    let campaign_id: String = column(row, "campaign_id")?;
    let customer_id: i64 = column(row, "customer_id")?;
    let email: String = column(row, "email")?;
    let subject: String = column(row, "subject")?;
    let body: String = column(row, "body")?;
    let sent_at: DateTime<Utc> = column(row, "sent_at")?;
    let status: String = column(row, "status")?;
    let opened: bool = column(row, "opened")?;

    Ok(SendRecord::from_parts(
        SendRecordId::new(id)?,
        CampaignId::new(campaign_id)?,
        CustomerId::new(customer_id),
        email,
        subject,
        body,
        sent_at,
        DeliveryStatus::parse(&status)?,
        opened,
    ))
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::storage(format!("Bad column '{}': {}", name, e)))
}
