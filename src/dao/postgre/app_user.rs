use sqlx::Error;

use crate::model::{AppUser, Table};

impl Table<AppUser> {
    pub async fn email_exists(&self, email: &str) -> Result<bool, Error> {
        const SQL: &str = r#"
        SELECT EXISTS(
            SELECT
            FROM "app_user"
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

    pub async fn insert(
        &self,
        email: String,
        password_hash: String,
        name: Option<String>,
    ) -> Result<AppUser, Error> {
        const SQL: &str = r#"
        INSERT INTO "app_user" ("email", "password_hash", "name")
        VALUES ($1, $2, $3)
        RETURNING *
        "#;

        sqlx::query_as(SQL)
            .bind(email)
            .bind(password_hash)
            .bind(name)
            .fetch_one(&self.pool)
            .await
    }
}
