pub mod entities;
pub mod migrator;
pub mod repositories;

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use migrator::Migrator;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./reservations.db?mode=rwc";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./reservations.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Connect and migrate, but never fail startup.
///
/// Returns `None` when the store is unreachable. Repositories built without a
/// connection fail each call with a storage error instead.
pub async fn try_connect(
    config: &DatabaseConfig,
    auto_migrate: bool,
) -> Option<DatabaseConnection> {
    let db = match init_database(config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return None;
        }
    };

    if auto_migrate {
        info!("Running database migrations...");
        match Migrator::up(&db, None).await {
            Ok(()) => info!("Migrations completed"),
            Err(e) => error!("Failed to run migrations: {}", e),
        }
    }

    Some(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_database_yields_no_connection() {
        let config = DatabaseConfig {
            url: "sqlite:///nonexistent-dir/for/sure/reservations.db?mode=ro".into(),
        };
        assert!(try_connect(&config, true).await.is_none());
    }

    #[tokio::test]
    async fn in_memory_database_connects_and_migrates() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".into(),
        };
        let db = try_connect(&config, true).await.unwrap();
        assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());
    }
}
