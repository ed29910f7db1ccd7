//! PostgreSQL campaign repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::{
    Campaign, CampaignId, CampaignRepository, CampaignStatus, CampaignType, DomainError,
};

/// PostgreSQL implementation of CampaignRepository against the
/// `marketing_campaigns` table
#[derive(Debug, Clone)]
pub struct PostgresCampaignRepository {
    pool: PgPool,
}

impl PostgresCampaignRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampaignRepository for PostgresCampaignRepository {
    async fn create(&self, campaign: Campaign) -> Result<Campaign, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO marketing_campaigns (id, name, type, description, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(campaign.id().as_str())
        .bind(&campaign.name)
        .bind(campaign.campaign_type.as_str())
        .bind(&campaign.description)
        .bind(campaign.status().as_str())
        .bind(campaign.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::validation(format!(
                    "Campaign '{}' already exists",
                    campaign.id()
                ))
            } else {
                DomainError::storage(format!("Failed to create campaign: {}", e))
            }
        })?;

        Ok(campaign)
    }

    async fn get(&self, id: &CampaignId) -> Result<Option<Campaign>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, type, description, status, created_at
            FROM marketing_campaigns
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get campaign: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_campaign(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, campaign: &Campaign) -> Result<Campaign, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE marketing_campaigns
            SET name = $2, type = $3, description = $4, status = $5
            WHERE id = $1
            "#,
        )
        .bind(campaign.id().as_str())
        .bind(&campaign.name)
        .bind(campaign.campaign_type.as_str())
        .bind(&campaign.description)
        .bind(campaign.status().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update campaign: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Campaign '{}' not found",
                campaign.id()
            )));
        }

        Ok(campaign.clone())
    }

    async fn list(&self) -> Result<Vec<Campaign>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, type, description, status, created_at
            FROM marketing_campaigns
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list campaigns: {}", e)))?;

        rows.iter().map(row_to_campaign).collect()
    }
}

fn row_to_campaign(row: &PgRow) -> Result<Campaign, DomainError> {
    let id: String = column(row, "id")?;
    let name: String = column(row, "name")?;
    let type_label: String = column(row, "type")?;
    let description: String = column(row, "description")?;
    let status_label: String = column(row, "status")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;

    Ok(Campaign::from_parts(
        CampaignId::new(id)?,
        name,
        type_label.parse::<CampaignType>()?,
        description,
        CampaignStatus::parse(&status_label)?,
        created_at,
    ))
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::storage(format!("Bad column '{}': {}", name, e)))
}
