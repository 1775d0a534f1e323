use serde_json::Value;
use sqlx::Error;

use crate::model::{InspectionChecklist, Table};

impl Table<InspectionChecklist> {
    pub async fn insert(
        &self,
        name: String,
        items: Value,
    ) -> Result<InspectionChecklist, Error> {
        const SQL: &str = r#"
        INSERT INTO "inspection_checklist" ("name", "items")
        VALUES ($1, $2)
        RETURNING *
        "#;

        sqlx::query_as(SQL)
            .bind(name)
            .bind(items)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<InspectionChecklist>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "inspection_checklist"
        ORDER BY "name" ASC
        "#;

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }
}
