use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::Error;

use crate::model::{Table, UtilityReading};

impl Table<UtilityReading> {
    pub async fn insert(
        &self,
        provider_id: i64,
        reading: BigDecimal,
        reading_date: DateTime<Utc>,
        photo_url: Option<String>,
    ) -> Result<UtilityReading, Error> {
        const SQL: &str = r#"
        INSERT INTO "utility_reading" (
            "provider_id",
            "reading",
            "reading_date",
            "photo_url"
        )
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#;

        sqlx::query_as(SQL)
            .bind(provider_id)
            .bind(&reading)
            .bind(reading_date)
            .bind(photo_url)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<UtilityReading>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "utility_reading"
        ORDER BY "reading_date" DESC
        "#;

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    pub async fn get_by_provider(
        &self,
        provider_id: i64,
    ) -> Result<Vec<UtilityReading>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "utility_reading"
        WHERE "provider_id" = $1
        ORDER BY "reading_date" DESC
        "#;

        sqlx::query_as(SQL)
            .bind(provider_id)
            .fetch_all(&self.pool)
            .await
    }
}
