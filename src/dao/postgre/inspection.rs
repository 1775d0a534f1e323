use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{Error, FromRow};

use crate::model::{Inspection, Table};

#[derive(Debug, Clone, FromRow)]
pub struct InspectionDetailsRow {
    pub id: i64,
    pub property: String,
    pub checklist: String,
    pub inspection_date: DateTime<Utc>,
    pub results: Value,
    pub notes: Option<String>,
}

impl Table<Inspection> {
    pub async fn insert(
        &self,
        property_id: i64,
        checklist_id: i64,
        inspection_date: DateTime<Utc>,
        results: Value,
        notes: Option<String>,
    ) -> Result<Inspection, Error> {
        const SQL: &str = r#"
        INSERT INTO "inspection" (
            "property_id",
            "checklist_id",
            "inspection_date",
            "results",
            "notes"
        )
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#;

        sqlx::query_as(SQL)
            .bind(property_id)
            .bind(checklist_id)
            .bind(inspection_date)
            .bind(results)
            .bind(notes)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn get_all_with_details(
        &self,
    ) -> Result<Vec<InspectionDetailsRow>, Error> {
        const SQL: &str = r#"
        SELECT
            i."id",
            p."name" AS "property",
            c."name" AS "checklist",
            i."inspection_date",
            i."results",
            i."notes"
        FROM "inspection" i
        JOIN "property" p ON p."id" = i."property_id"
        JOIN "inspection_checklist" c ON c."id" = i."checklist_id"
        ORDER BY i."inspection_date" DESC
        "#;

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    pub async fn count(&self, property_id: Option<i64>) -> Result<i64, Error> {
        const SQL: &str = r#"
        SELECT COUNT(*)
        FROM "inspection"
        WHERE ($1::BIGINT IS NULL OR "property_id" = $1)
        "#;

        sqlx::query_as(SQL)
            .bind(property_id)
            .fetch_one(&self.pool)
            .await
            .map(|(count,)| count)
    }
}
