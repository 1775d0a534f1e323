use chrono::{DateTime, Utc};
use sqlx::{Error, FromRow};

use crate::model::{Table, Unit};

#[derive(Debug, Clone, FromRow)]
pub struct OccupancyRow {
    pub property: String,
    pub total_units: i64,
    pub occupied_units: i64,
}

impl Table<Unit> {
    pub async fn insert(
        &self,
        property_id: i64,
        name: String,
    ) -> Result<Unit, Error> {
        const SQL: &str = r#"
        INSERT INTO "unit" ("property_id", "name")
        VALUES ($1, $2)
        RETURNING *
        "#;

        sqlx::query_as(SQL)
            .bind(property_id)
            .bind(name)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<Unit>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "unit"
        ORDER BY "name" ASC
        "#;

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    pub async fn get_by_property(
        &self,
        property_id: i64,
    ) -> Result<Vec<Unit>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "unit"
        WHERE "property_id" = $1
        ORDER BY "name" ASC
        "#;

        sqlx::query_as(SQL)
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn count(&self, property_id: Option<i64>) -> Result<i64, Error> {
        const SQL: &str = r#"
        SELECT COUNT(*)
        FROM "unit"
        WHERE ($1::BIGINT IS NULL OR "property_id" = $1)
        "#;

        sqlx::query_as(SQL)
            .bind(property_id)
            .fetch_one(&self.pool)
            .await
            .map(|(count,)| count)
    }

    /// Units covered by a lease active at the given instant.
    pub async fn count_occupied(
        &self,
        property_id: Option<i64>,
        at: DateTime<Utc>,
    ) -> Result<i64, Error> {
        const SQL: &str = r#"
        SELECT COUNT(*)
        FROM "unit" u
        WHERE
            ($1::BIGINT IS NULL OR u."property_id" = $1)
        AND EXISTS (
            SELECT
            FROM "lease" l
            WHERE
                l."unit_id" = u."id"
            AND l."start_date" <= $2
            AND l."end_date" >= $2
        )
        "#;

        sqlx::query_as(SQL)
            .bind(property_id)
            .bind(at)
            .fetch_one(&self.pool)
            .await
            .map(|(count,)| count)
    }

    /// Per-property unit totals with the number of units covered by a lease
    /// active at the given instant. Properties without units still appear.
    pub async fn get_occupancy_by_property(
        &self,
        at: DateTime<Utc>,
    ) -> Result<Vec<OccupancyRow>, Error> {
        const SQL: &str = r#"
        SELECT
            p."name" AS "property",
            COUNT(DISTINCT u."id") AS "total_units",
            COUNT(DISTINCT l."unit_id") AS "occupied_units"
        FROM "property" p
        LEFT JOIN "unit" u ON u."property_id" = p."id"
        LEFT JOIN "lease" l
            ON l."unit_id" = u."id"
            AND l."start_date" <= $1
            AND l."end_date" >= $1
        GROUP BY p."name"
        ORDER BY p."name" ASC
        "#;

        sqlx::query_as(SQL).bind(at).fetch_all(&self.pool).await
    }
}
