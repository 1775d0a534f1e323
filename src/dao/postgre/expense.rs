use bigdecimal::{BigDecimal, Zero as _};
use chrono::{DateTime, Utc};
use sqlx::{Error, FromRow};

use crate::model::{Expense, Table};

use super::payment::PropertyTotal;

#[derive(Debug, Clone, FromRow)]
pub struct ExpenseReportRow {
    pub date: DateTime<Utc>,
    pub property: String,
    pub category: String,
    pub description: Option<String>,
    pub amount: BigDecimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct CategoryTotal {
    pub category: String,
    pub total: BigDecimal,
}

impl Table<Expense> {
    pub async fn insert(
        &self,
        property_id: i64,
        category: String,
        amount: BigDecimal,
        description: Option<String>,
        date: DateTime<Utc>,
    ) -> Result<Expense, Error> {
        const SQL: &str = r#"
        INSERT INTO "expense" (
            "property_id",
            "category",
            "amount",
            "description",
            "date"
        )
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#;

        sqlx::query_as(SQL)
            .bind(property_id)
            .bind(category)
            .bind(&amount)
            .bind(description)
            .bind(date)
            .fetch_one(&self.pool)
            .await
    }

    /// Expenses in the date range with the owning property name, newest first.
    pub async fn get_report(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        property_id: Option<i64>,
    ) -> Result<Vec<ExpenseReportRow>, Error> {
        const SQL: &str = r#"
        SELECT
            e."date",
            p."name" AS "property",
            e."category",
            e."description",
            e."amount"
        FROM "expense" e
        JOIN "property" p ON p."id" = e."property_id"
        WHERE
            e."date" >= $1
        AND e."date" <= $2
        AND ($3::BIGINT IS NULL OR e."property_id" = $3)
        ORDER BY e."date" DESC
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
        SELECT SUM("amount")
        FROM "expense"
        WHERE
            "date" >= $1
        AND "date" <= $2
        AND ($3::BIGINT IS NULL OR "property_id" = $3)
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

    pub async fn get_totals_by_category(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        property_id: Option<i64>,
    ) -> Result<Vec<CategoryTotal>, Error> {
        const SQL: &str = r#"
        SELECT
            "category",
            SUM("amount") AS "total"
        FROM "expense"
        WHERE
            "date" >= $1
        AND "date" <= $2
        AND ($3::BIGINT IS NULL OR "property_id" = $3)
        GROUP BY "category"
        ORDER BY "category" ASC
        "#;

        sqlx::query_as(SQL)
            .bind(from)
            .bind(to)
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_totals_by_property(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        property_id: Option<i64>,
    ) -> Result<Vec<PropertyTotal>, Error> {
        const SQL: &str = r#"
        SELECT
            p."name" AS "property",
            SUM(e."amount") AS "total"
        FROM "expense" e
        JOIN "property" p ON p."id" = e."property_id"
        WHERE
            e."date" >= $1
        AND e."date" <= $2
        AND ($3::BIGINT IS NULL OR e."property_id" = $3)
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
}
