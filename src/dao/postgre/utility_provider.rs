use sqlx::Error;

use crate::model::{Table, UtilityProvider};

impl Table<UtilityProvider> {
    pub async fn insert(&self, name: String) -> Result<UtilityProvider, Error> {
        const SQL: &str = r#"
        INSERT INTO "utility_provider" ("name")
        VALUES ($1)
        RETURNING *
        "#;

        sqlx::query_as(SQL).bind(name).fetch_one(&self.pool).await
    }

    pub async fn get_all(&self) -> Result<Vec<UtilityProvider>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "utility_provider"
        ORDER BY "name" ASC
        "#;

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    pub async fn get_one(
        &self,
        id: i64,
    ) -> Result<Option<UtilityProvider>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "utility_provider"
        WHERE "id" = $1
        "#;

        sqlx::query_as(SQL)
            .bind(id)
            .persistent(true)
            .fetch_optional(&self.pool)
            .await
    }
}
