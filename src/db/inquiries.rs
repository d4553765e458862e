// Postgres-backed inquiry repository

use super::queries::{INQUIRY_COLUMNS, INSERT_INQUIRY, UPDATE_INQUIRY_STATUS};
use crate::error::AppError;
use crate::models::{Inquiry, InquiryStatus, NewInquiry};
use crate::store::InquiryRepository;
use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tracing::{debug, warn};
use uuid::Uuid;

pub struct PgInquiryRepository {
    pool: Pool,
}

impl PgInquiryRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn inquiry_from_row(row: &Row) -> Inquiry {
    let status: String = row.get("status");
    Inquiry {
        id: row.get("id"),
        created_at: row.get("created_at"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        event_type: row.get("event_type"),
        event_type_other: row.get("event_type_other"),
        event_date: row.get("event_date"),
        guest_count: row.get("guest_count"),
        hear_about_us: row.get("hear_about_us"),
        hear_about_us_other: row.get("hear_about_us_other"),
        message: row.get("message"),
        // The CHECK constraint keeps this in range
        status: status.parse().unwrap_or_else(|_| {
            warn!("Unexpected inquiry status in database: {}", status);
            InquiryStatus::New
        }),
    }
}

#[async_trait]
impl InquiryRepository for PgInquiryRepository {
    async fn insert(&self, new: NewInquiry) -> Result<Inquiry, AppError> {
        let client = self.pool.get().await?;

        let row = client
            .query_one(
                INSERT_INQUIRY,
                &[
                    &new.name,
                    &new.email,
                    &new.phone,
                    &new.event_type.as_str(),
                    &new.event_type_other,
                    &new.event_date,
                    &new.guest_count,
                    &new.hear_about_us.as_str(),
                    &new.hear_about_us_other,
                    &new.message,
                ],
            )
            .await?;

        let inquiry = inquiry_from_row(&row);
        debug!("Inquiry stored: {}", inquiry.id);
        Ok(inquiry)
    }

    async fn list(&self) -> Result<Vec<Inquiry>, AppError> {
        let client = self.pool.get().await?;

        let rows = client
            .query(
                &format!("SELECT {} FROM inquiries ORDER BY created_at DESC", INQUIRY_COLUMNS),
                &[],
            )
            .await?;

        Ok(rows.iter().map(inquiry_from_row).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Inquiry>, AppError> {
        let client = self.pool.get().await?;

        let row = client
            .query_opt(
                &format!("SELECT {} FROM inquiries WHERE id = $1", INQUIRY_COLUMNS),
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(inquiry_from_row))
    }

    async fn update_status(&self, id: Uuid, status: InquiryStatus) -> Result<Option<Inquiry>, AppError> {
        let client = self.pool.get().await?;

        let row = client
            .query_opt(UPDATE_INQUIRY_STATUS, &[&id, &status.as_str()])
            .await?;

        Ok(row.as_ref().map(inquiry_from_row))
    }
}
