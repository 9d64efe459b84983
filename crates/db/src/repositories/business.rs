use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use slotwise_core::errors::{BookingError, BookingResult};
use slotwise_core::models::availability::BusinessAvailability;
use slotwise_core::models::business::{BookingPolicy, Service};
use slotwise_core::repository::BusinessConfigRepository;

use crate::models::{DbBusiness, DbService};

pub struct PgBusinessConfigRepository {
    pool: Pool<Postgres>,
}

impl PgBusinessConfigRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn get_business(&self, business_id: Uuid) -> BookingResult<DbBusiness> {
        sqlx::query_as::<_, DbBusiness>(
            r#"
            SELECT id, name, owner_email, timezone, weekly_hours, overrides,
                   limit_to_one_upcoming, created_at
            FROM businesses
            WHERE id = $1
            "#,
        )
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| BookingError::Database(err.into()))?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Business with ID {business_id} not found"))
        })
    }
}

#[async_trait]
impl BusinessConfigRepository for PgBusinessConfigRepository {
    async fn get_availability(&self, business_id: Uuid) -> BookingResult<BusinessAvailability> {
        let business = self.get_business(business_id).await?;
        business.availability().map_err(BookingError::Database)
    }

    async fn get_policy(&self, business_id: Uuid) -> BookingResult<BookingPolicy> {
        Ok(self.get_business(business_id).await?.policy())
    }

    async fn get_owner_email(&self, business_id: Uuid) -> BookingResult<String> {
        Ok(self.get_business(business_id).await?.owner_email)
    }

    async fn find_service(
        &self,
        business_id: Uuid,
        service_id: Uuid,
    ) -> BookingResult<Option<Service>> {
        let row = sqlx::query_as::<_, DbService>(
            r#"
            SELECT id, business_id, name, duration_minutes, is_active, created_at
            FROM services
            WHERE id = $1 AND business_id = $2
            "#,
        )
        .bind(service_id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| BookingError::Database(err.into()))?;

        row.map(|service| service.into_service().map_err(BookingError::Database))
            .transpose()
    }
}
