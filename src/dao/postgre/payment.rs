use bigdecimal::{BigDecimal, Zero as _};
use chrono::{DateTime, Utc};
use sqlx::{Error, FromRow};

use crate::model::{Payment, Table};

#[derive(Debug, Clone, FromRow)]
pub struct PaymentHistoryRow {
    pub payment_date: DateTime<Utc>,
    pub property: String,
    pub unit: String,
    pub tenant: String,
    pub amount: BigDecimal,
    pub status: String,
    pub collector_notes: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct PropertyTotal {
    pub property: String,
    pub total: BigDecimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct OverduePaymentRow {
    pub payment_id: i64,
    pub amount: BigDecimal,
    pub payment_date: DateTime<Utc>,
    pub tenant_name: String,
    pub tenant_email: String,
    pub unit_name: String,
    pub property_name: String,
}

impl Table<Payment> {
    pub async fn insert(
        &self,
        lease_id: i64,
        amount: BigDecimal,
        payment_date: DateTime<Utc>,
        status: String,
        collector_notes: Option<String>,
    ) -> Result<Payment, Error> {
        const SQL: &str = r#"
        INSERT INTO "payment" (
            "lease_id",
            "amount",
            "payment_date",
            "status",
            "collector_notes"
        )
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#;

        sqlx::query_as(SQL)
            .bind(lease_id)
            .bind(&amount)
            .bind(payment_date)
            .bind(status)
            .bind(collector_notes)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn get_all_with_details(
        &self,
    ) -> Result<Vec<PaymentHistoryRow>, Error> {
        const SQL: &str = r#"
        SELECT
            pay."payment_date",
            p."name" AS "property",
            u."name" AS "unit",
            t."name" AS "tenant",
            pay."amount",
            pay."status",
            pay."collector_notes"
        FROM "payment" pay
        JOIN "lease" l ON l."id" = pay."lease_id"
        JOIN "unit" u ON u."id" = l."unit_id"
        JOIN "property" p ON p."id" = u."property_id"
        JOIN "tenant" t ON t."id" = l."tenant_id"
        ORDER BY pay."payment_date" DESC
        "#;

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    /// Payments in the date range, optionally restricted to one property,
    /// newest first.
    pub async fn get_history(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        property_id: Option<i64>,
    ) -> Result<Vec<PaymentHistoryRow>, Error> {
        const SQL: &str = r#"
        SELECT
            pay."payment_date",
            p."name" AS "property",
            u."name" AS "unit",
            t."name" AS "tenant",
            pay."amount",
            pay."status",
            pay."collector_notes"
        FROM "payment" pay
        JOIN "lease" l ON l."id" = pay."lease_id"
        JOIN "unit" u ON u."id" = l."unit_id"
        JOIN "property" p ON p."id" = u."property_id"
        JOIN "tenant" t ON t."id" = l."tenant_id"
        WHERE
            pay."payment_date" >= $1
        AND pay."payment_date" <= $2
        AND ($3::BIGINT IS NULL OR u."property_id" = $3)
        ORDER BY pay."payment_date" DESC
        "#;

        sqlx::query_as(SQL)
            .bind(from)
            .bind(to)
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_total_amount(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        property_id: Option<i64>,
    ) -> Result<BigDecimal, Error> {
        const SQL: &str = r#"
        SELECT SUM(pay."amount")
        FROM "payment" pay
        JOIN "lease" l ON l."id" = pay."lease_id"
        JOIN "unit" u ON u."id" = l."unit_id"
        WHERE
            pay."payment_date" >= $1
        AND pay."payment_date" <= $2
        AND ($3::BIGINT IS NULL OR u."property_id" = $3)
        "#;

        sqlx::query_as(SQL)
            .bind(from)
            .bind(to)
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await
            .map(|row: Option<(Option<BigDecimal>,)>| {
                row.and_then(|(sum,)| sum).unwrap_or_else(BigDecimal::zero)
            })
    }

    /// Lifetime revenue, optionally restricted to one property.
    pub async fn get_total_amount_all(
        &self,
        property_id: Option<i64>,
    ) -> Result<BigDecimal, Error> {
        const SQL: &str = r#"
        SELECT SUM(pay."amount")
        FROM "payment" pay
        JOIN "lease" l ON l."id" = pay."lease_id"
        JOIN "unit" u ON u."id" = l."unit_id"
        WHERE ($1::BIGINT IS NULL OR u."property_id" = $1)
        "#;

        sqlx::query_as(SQL)
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await
            .map(|row: Option<(Option<BigDecimal>,)>| {
                row.and_then(|(sum,)| sum).unwrap_or_else(BigDecimal::zero)
            })
    }

    pub async fn count_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, Error> {
        const SQL: &str = r#"
        SELECT COUNT(*)
        FROM "payment"
        WHERE
            "payment_date" >= $1
        AND "payment_date" <= $2
        "#;

        sqlx::query_as(SQL)
            .bind(from)
            .bind(to)
            .fetch_one(&self.pool)
            .await
            .map(|(count,)| count)
    }

    pub async fn get_status_counts(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        property_id: Option<i64>,
    ) -> Result<Vec<StatusCount>, Error> {
        const SQL: &str = r#"
        SELECT
            pay."status",
            COUNT(*) AS "count"
        FROM "payment" pay
        JOIN "lease" l ON l."id" = pay."lease_id"
        JOIN "unit" u ON u."id" = l."unit_id"
        WHERE
            pay."payment_date" >= $1
        AND pay."payment_date" <= $2
        AND ($3::BIGINT IS NULL OR u."property_id" = $3)
        GROUP BY pay."status"
        "#;

        sqlx::query_as(SQL)
            .bind(from)
            .bind(to)
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_status_counts_all(
        &self,
        property_id: Option<i64>,
    ) -> Result<Vec<StatusCount>, Error> {
        const SQL: &str = r#"
        SELECT
            pay."status",
            COUNT(*) AS "count"
        FROM "payment" pay
        JOIN "lease" l ON l."id" = pay."lease_id"
        JOIN "unit" u ON u."id" = l."unit_id"
        WHERE ($1::BIGINT IS NULL OR u."property_id" = $1)
        GROUP BY pay."status"
        "#;

        sqlx::query_as(SQL)
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_income_by_property(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        property_id: Option<i64>,
    ) -> Result<Vec<PropertyTotal>, Error> {
        const SQL: &str = r#"
        SELECT
            p."name" AS "property",
            SUM(pay."amount") AS "total"
        FROM "payment" pay
        JOIN "lease" l ON l."id" = pay."lease_id"
        JOIN "unit" u ON u."id" = l."unit_id"
        JOIN "property" p ON p."id" = u."property_id"
        WHERE
            pay."payment_date" >= $1
        AND pay."payment_date" <= $2
        AND ($3::BIGINT IS NULL OR u."property_id" = $3)
        GROUP BY p."name"
        ORDER BY p."name" ASC
        "#;

        sqlx::query_as(SQL)
            .bind(from)
            .bind(to)
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Unpaid payments on leases still active at the given instant.
    pub async fn get_overdue_with_contacts(
        &self,
        at: DateTime<Utc>,
    ) -> Result<Vec<OverduePaymentRow>, Error> {
        const SQL: &str = r#"
        SELECT
            pay."id" AS "payment_id",
            pay."amount",
            pay."payment_date",
            t."name" AS "tenant_name",
            t."email" AS "tenant_email",
            u."name" AS "unit_name",
            p."name" AS "property_name"
        FROM "payment" pay
        JOIN "lease" l ON l."id" = pay."lease_id"
        JOIN "unit" u ON u."id" = l."unit_id"
        JOIN "property" p ON p."id" = u."property_id"
        JOIN "tenant" t ON t."id" = l."tenant_id"
        WHERE
            pay."status" = 'NOT_PAID'
        AND l."end_date" >= $1
        ORDER BY pay."payment_date" ASC
        "#;

        sqlx::query_as(SQL).bind(at).fetch_all(&self.pool).await
    }
}
