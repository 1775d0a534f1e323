use chrono::{DateTime, Utc};
use sqlx::{Error, FromRow};

use crate::model::{Table, Tenant};

#[derive(Debug, Clone, FromRow)]
pub struct TenantDirectoryRow {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl Table<Tenant> {
    pub async fn insert(
        &self,
        name: String,
        email: String,
        phone: Option<String>,
    ) -> Result<Tenant, Error> {
        const SQL: &str = r#"
        INSERT INTO "tenant" ("name", "email", "phone")
        VALUES ($1, $2, $3)
        RETURNING *
        "#;

        sqlx::query_as(SQL)
            .bind(name)
            .bind(email)
            .bind(phone)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<Tenant>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "tenant"
        ORDER BY "name" ASC
        "#;

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, Error> {
        const SQL: &str = r#"
        SELECT EXISTS(
            SELECT
            FROM "tenant"
            WHERE "email" = $1
        )
        "#;

        sqlx::query_as(SQL)
            .bind(email)
            .persistent(true)
            .fetch_one(&self.pool)
            .await
            .map(|(exists,)| exists)
    }

    pub async fn count(&self) -> Result<i64, Error> {
        const SQL: &str = r#"
        SELECT COUNT(*)
        FROM "tenant"
        "#;

        sqlx::query_as(SQL)
            .fetch_one(&self.pool)
            .await
            .map(|(count,)| count)
    }

    /// Directory rows, optionally restricted to tenants holding a lease
    /// active at the given instant on a unit of the given property.
    pub async fn get_directory(
        &self,
        property_id: Option<i64>,
        at: DateTime<Utc>,
    ) -> Result<Vec<TenantDirectoryRow>, Error> {
        const SQL: &str = r#"
        SELECT DISTINCT
            t."name",
            t."email",
            t."phone"
        FROM "tenant" t
        WHERE
            $1::BIGINT IS NULL
        OR EXISTS (
            SELECT
            FROM "lease" l
            JOIN "unit" u ON u."id" = l."unit_id"
            WHERE
                l."tenant_id" = t."id"
            AND u."property_id" = $1
            AND l."start_date" <= $2
            AND l."end_date" >= $2
        )
        ORDER BY t."name" ASC
        "#;

        sqlx::query_as(SQL)
            .bind(property_id)
            .bind(at)
            .fetch_all(&self.pool)
            .await
    }
}
