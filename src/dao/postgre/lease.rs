use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::{Error, FromRow};

use crate::model::{Lease, Table};

#[derive(Debug, Clone, FromRow)]
pub struct LeaseDetailsRow {
    pub id: i64,
    pub property: String,
    pub unit: String,
    pub tenant: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub rent_amount: BigDecimal,
    pub deposit: Option<BigDecimal>,
}

#[derive(Debug, Clone, FromRow)]
pub struct RentRollRow {
    pub property: String,
    pub unit: String,
    pub tenant: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub rent_amount: BigDecimal,
    pub deposit: Option<BigDecimal>,
}

#[derive(Debug, Clone, FromRow)]
pub struct LeaseExpirationRow {
    pub property: String,
    pub unit: String,
    pub tenant: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub phone: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct LeaseReminderRow {
    pub lease_id: i64,
    pub tenant_name: String,
    pub tenant_email: String,
    pub unit_name: String,
    pub property_name: String,
    pub end_date: DateTime<Utc>,
    pub rent_amount: BigDecimal,
}

impl Table<Lease> {
    pub async fn insert(
        &self,
        unit_id: i64,
        tenant_id: i64,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        rent_amount: BigDecimal,
        deposit: Option<BigDecimal>,
    ) -> Result<Lease, Error> {
        const SQL: &str = r#"
        INSERT INTO "lease" (
            "unit_id",
            "tenant_id",
            "start_date",
            "end_date",
            "rent_amount",
            "deposit"
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#;

        sqlx::query_as(SQL)
            .bind(unit_id)
            .bind(tenant_id)
            .bind(start_date)
            .bind(end_date)
            .bind(&rent_amount)
            .bind(&deposit)
            .fetch_one(&self.pool)
            .await
    }

    /// A lease on the unit whose date range intersects the given range.
    pub async fn overlapping_exists(
        &self,
        unit_id: i64,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<bool, Error> {
        const SQL: &str = r#"
        SELECT EXISTS(
            SELECT
            FROM "lease"
            WHERE
                "unit_id" = $1
            AND "start_date" <= $3
            AND "end_date" >= $2
        )
        "#;

        sqlx::query_as(SQL)
            .bind(unit_id)
            .bind(start_date)
            .bind(end_date)
            .persistent(true)
            .fetch_one(&self.pool)
            .await
            .map(|(exists,)| exists)
    }

    pub async fn get_all_with_details(
        &self,
    ) -> Result<Vec<LeaseDetailsRow>, Error> {
        const SQL: &str = r#"
        SELECT
            l."id",
            p."name" AS "property",
            u."name" AS "unit",
            t."name" AS "tenant",
            l."start_date",
            l."end_date",
            l."rent_amount",
            l."deposit"
        FROM "lease" l
        JOIN "unit" u ON u."id" = l."unit_id"
        JOIN "property" p ON p."id" = u."property_id"
        JOIN "tenant" t ON t."id" = l."tenant_id"
        ORDER BY l."start_date" DESC
        "#;

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    /// Active leases for a property, ordered by unit name.
    pub async fn get_rent_roll(
        &self,
        property_id: i64,
        at: DateTime<Utc>,
    ) -> Result<Vec<RentRollRow>, Error> {
        const SQL: &str = r#"
        SELECT
            p."name" AS "property",
            u."name" AS "unit",
            t."name" AS "tenant",
            l."start_date",
            l."end_date",
            l."rent_amount",
            l."deposit"
        FROM "lease" l
        JOIN "unit" u ON u."id" = l."unit_id"
        JOIN "property" p ON p."id" = u."property_id"
        JOIN "tenant" t ON t."id" = l."tenant_id"
        WHERE
            u."property_id" = $1
        AND l."end_date" >= $2
        ORDER BY u."name" ASC
        "#;

        sqlx::query_as(SQL)
            .bind(property_id)
            .bind(at)
            .fetch_all(&self.pool)
            .await
    }

    /// Leases ending on or before the cutoff, soonest first.
    pub async fn get_expiring_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<LeaseExpirationRow>, Error> {
        const SQL: &str = r#"
        SELECT
            p."name" AS "property",
            u."name" AS "unit",
            t."name" AS "tenant",
            l."start_date",
            l."end_date",
            t."phone",
            t."email"
        FROM "lease" l
        JOIN "unit" u ON u."id" = l."unit_id"
        JOIN "property" p ON p."id" = u."property_id"
        JOIN "tenant" t ON t."id" = l."tenant_id"
        WHERE l."end_date" <= $1
        ORDER BY l."end_date" ASC
        "#;

        sqlx::query_as(SQL).bind(cutoff).fetch_all(&self.pool).await
    }

    /// Leases ending inside the window, with tenant contact for reminders.
    pub async fn get_expiring_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<LeaseReminderRow>, Error> {
        const SQL: &str = r#"
        SELECT
            l."id" AS "lease_id",
            t."name" AS "tenant_name",
            t."email" AS "tenant_email",
            u."name" AS "unit_name",
            p."name" AS "property_name",
            l."end_date",
            l."rent_amount"
        FROM "lease" l
        JOIN "unit" u ON u."id" = l."unit_id"
        JOIN "property" p ON p."id" = u."property_id"
        JOIN "tenant" t ON t."id" = l."tenant_id"
        WHERE
            l."end_date" >= $1
        AND l."end_date" <= $2
        ORDER BY l."end_date" ASC
        "#;

        sqlx::query_as(SQL)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await
    }
}
