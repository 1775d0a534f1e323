//! Database migration module using refinery
//!
//! Provides atomic, versioned database migrations that run on startup.
//! Migrations are tracked in a `refinery_schema_history` table.

use refinery::{embed_migrations, Target};
use tokio_postgres::NoTls;

use crate::error::Error;

// Embed migrations from the migrations/ directory at compile time
embed_migrations!("migrations");

/// Run all pending database migrations atomically.
pub async fn run_migrations(database_url: &str) -> Result<(), Error> {
    tracing::info!("Running database migrations...");

    let config: tokio_postgres::Config = database_url.parse().map_err(|e| {
        Error::ConfigurationError(format!("Invalid database URL: {}", e))
    })?;

    let (mut client, connection) =
        config.connect(NoTls).await.map_err(|e| {
            Error::ConfigurationError(format!(
                "Failed to connect for migrations: {}",
                e
            ))
        })?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("Migration connection error: {}", e);
        }
    });

    let report = migrations::runner()
        .run_async(&mut client)
        .await
        .map_err(|e| {
            Error::ConfigurationError(format!("Migration failed: {}", e))
        })?;

    let applied = report.applied_migrations();
    if applied.is_empty() {
        tracing::info!("No new migrations to apply");
    } else {
        for migration in applied {
            tracing::info!(
                "Applied migration: V{:03}__{} (checksum: {})",
                migration.version(),
                migration.name(),
                migration.checksum()
            );
        }
        tracing::info!(
            "Successfully applied {} migration(s)",
            applied.len()
        );
    }

    Ok(())
}

/// Mark migrations as applied without running them.
///
/// Useful for databases where the schema already exists from manual
/// migration. `up_to_version: None` fakes everything, `Some(N)` only up to N.
pub async fn run_migrations_fake(
    database_url: &str,
    up_to_version: Option<u32>,
) -> Result<(), Error> {
    let config: tokio_postgres::Config = database_url.parse().map_err(|e| {
        Error::ConfigurationError(format!("Invalid database URL: {}", e))
    })?;

    let (mut client, connection) =
        config.connect(NoTls).await.map_err(|e| {
            Error::ConfigurationError(format!(
                "Failed to connect for migrations: {}",
                e
            ))
        })?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("Migration connection error: {}", e);
        }
    });

    let target = match up_to_version {
        None => Target::Fake,
        Some(v) => Target::FakeVersion(v),
    };

    let report = migrations::runner()
        .set_target(target)
        .run_async(&mut client)
        .await
        .map_err(|e| {
            Error::ConfigurationError(format!("Migration failed: {}", e))
        })?;

    let applied = report.applied_migrations();
    if applied.is_empty() {
        tracing::info!("No migrations to mark as applied");
    } else {
        for migration in applied {
            tracing::info!(
                "Marked as applied: V{:03}__{} (checksum: {})",
                migration.version(),
                migration.name(),
                migration.checksum()
            );
        }
        tracing::info!("Marked {} migration(s) as applied", applied.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_embedded() {
        let runner = migrations::runner();
        let migrations = runner.get_migrations();
        assert!(!migrations.is_empty(), "No migrations found");

        let mut sorted_versions: Vec<u32> =
            migrations.iter().map(|m| m.version()).collect();
        sorted_versions.sort();

        let mut prev_version = 0;
        for version in &sorted_versions {
            assert!(
                *version > prev_version,
                "Migrations must have unique ascending version numbers"
            );
            prev_version = *version;
        }

        assert_eq!(sorted_versions.len(), 3, "Expected 3 migrations");
        assert_eq!(
            sorted_versions.first(),
            Some(&1),
            "First migration should be V001"
        );
    }
}
