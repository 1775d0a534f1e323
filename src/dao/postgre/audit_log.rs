use serde_json::Value;
use sqlx::Error;

use super::QueryResult;
use crate::model::{AuditLog, Table};

impl Table<AuditLog> {
    pub async fn insert(
        &self,
        action: String,
        actor: String,
        details: Value,
    ) -> Result<QueryResult, Error> {
        const SQL: &str = r#"
        INSERT INTO "audit_log" ("action", "actor", "details")
        VALUES ($1, $2, $3)
        "#;

        sqlx::query(SQL)
            .bind(action)
            .bind(actor)
            .bind(details)
            .execute(&self.pool)
            .await
    }
}
