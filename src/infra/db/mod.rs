//! Database connection, schema migrations and the health probe.

use std::collections::HashSet;

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, EntityTrait, Statement,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use crate::config::Config;
use crate::errors::AppResult;

pub mod migrations;

pub use migrations::Migrator;

/// Connectivity check used by the health endpoint.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

/// Schema change applied by `Database::migrate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStep {
    /// Apply every pending migration
    Up,
    /// Revert the most recent migration
    Down,
    /// Drop all tables and apply everything again
    Fresh,
}

/// One known migration and whether the database has applied it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Pooled SeaORM connection shared by every repository
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the pool. With `apply_pending` set, the schema is brought up to date first.
    pub async fn open(config: &Config, apply_pending: bool) -> Result<Self, DbErr> {
        let db = Self {
            connection: SeaDatabase::connect(&config.database_url).await?,
        };

        if apply_pending {
            db.migrate(MigrationStep::Up).await.inspect_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
            })?;
            tracing::info!("Database connected and migrations applied");
        } else {
            tracing::debug!("Database connected");
        }

        Ok(db)
    }

    /// Clone of the pool handle; clones share connections.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn migrate(&self, step: MigrationStep) -> Result<(), DbErr> {
        match step {
            MigrationStep::Up => Migrator::up(&self.connection, None).await,
            MigrationStep::Down => Migrator::down(&self.connection, Some(1)).await,
            MigrationStep::Fresh => Migrator::fresh(&self.connection).await,
        }
    }

    /// Every migration the binary knows about, in order.
    pub async fn migration_status(&self) -> Result<Vec<MigrationState>, DbErr> {
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                MigrationState {
                    applied: applied.contains(&name),
                    name,
                }
            })
            .collect())
    }
}

#[async_trait]
impl HealthProbe for Database {
    async fn ping(&self) -> AppResult<()> {
        let backend = self.connection.get_database_backend();
        self.connection
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await?;
        Ok(())
    }
}
