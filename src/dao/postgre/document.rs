use chrono::{DateTime, Utc};
use sqlx::{Error, FromRow};

use crate::model::{Document, Table};

#[derive(Debug, Clone, FromRow)]
pub struct ExpiringDocumentRow {
    pub document_id: i64,
    pub name: String,
    pub expires_at: DateTime<Utc>,
    pub tenant_name: String,
    pub tenant_email: String,
    pub unit_name: String,
    pub property_name: String,
}

impl Table<Document> {
    /// Documents expiring inside the window, with tenant contact.
    pub async fn get_expiring_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ExpiringDocumentRow>, Error> {
        const SQL: &str = r#"
        SELECT
            d."id" AS "document_id",
            d."name",
            d."expires_at",
            t."name" AS "tenant_name",
            t."email" AS "tenant_email",
            u."name" AS "unit_name",
            p."name" AS "property_name"
        FROM "document" d
        JOIN "lease" l ON l."id" = d."lease_id"
        JOIN "unit" u ON u."id" = l."unit_id"
        JOIN "property" p ON p."id" = u."property_id"
        JOIN "tenant" t ON t."id" = l."tenant_id"
        WHERE
            d."expires_at" IS NOT NULL
        AND d."expires_at" >= $1
        AND d."expires_at" <= $2
        ORDER BY d."expires_at" ASC
        "#;

        sqlx::query_as(SQL)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await
    }
}
