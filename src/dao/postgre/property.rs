use sqlx::Error;

use crate::model::{Property, Table};

impl Table<Property> {
    pub async fn insert(
        &self,
        name: String,
        address: String,
    ) -> Result<Property, Error> {
        const SQL: &str = r#"
        INSERT INTO "property" ("name", "address")
        VALUES ($1, $2)
        RETURNING *
        "#;

        sqlx::query_as(SQL)
            .bind(name)
            .bind(address)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<Property>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "property"
        ORDER BY "name" ASC
        "#;

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    pub async fn count(&self) -> Result<i64, Error> {
        const SQL: &str = r#"
        SELECT COUNT(*)
        FROM "property"
        "#;

        sqlx::query_as(SQL)
            .fetch_one(&self.pool)
            .await
            .map(|(count,)| count)
    }
}
