use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Needed for the appointment no-overlap exclusion constraint
    sqlx::query("CREATE EXTENSION IF NOT EXISTS btree_gist;")
        .execute(pool)
        .await?;

    // Create businesses table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS businesses (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            owner_email VARCHAR(255) NOT NULL,
            timezone VARCHAR(64) NOT NULL DEFAULT 'UTC',
            weekly_hours JSONB NOT NULL DEFAULT '{}',
            overrides JSONB NOT NULL DEFAULT '{}',
            limit_to_one_upcoming BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            business_id UUID NOT NULL REFERENCES businesses(id),
            name VARCHAR(255) NOT NULL,
            duration_minutes INT NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table. The exclusion constraint is the engine's
    // central guarantee: no two BOOKED appointments for the same business
    // and date may hold overlapping half-open minute ranges, and the store
    // itself rejects the losing writer of a race.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            business_id UUID NOT NULL REFERENCES businesses(id),
            customer_email VARCHAR(255) NOT NULL,
            customer_name VARCHAR(255) NULL,
            service_id UUID NOT NULL REFERENCES services(id),
            service_name VARCHAR(255) NOT NULL,
            date DATE NOT NULL,
            start_minute INT NOT NULL,
            end_minute INT NOT NULL,
            duration_minutes INT NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'BOOKED',
            cancelled_by VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            rescheduled_at TIMESTAMP WITH TIME ZONE NULL,
            CONSTRAINT valid_minute_range CHECK (
                start_minute >= 0 AND end_minute < 1440 AND start_minute < end_minute
            ),
            CONSTRAINT no_overlapping_bookings EXCLUDE USING gist (
                business_id WITH =,
                date WITH =,
                int4range(start_minute, end_minute) WITH &&
            ) WHERE (status = 'BOOKED')
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_services_business_id ON services(business_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_business_date ON appointments(business_id, date);
        CREATE INDEX IF NOT EXISTS idx_appointments_customer ON appointments(business_id, customer_email, status);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
