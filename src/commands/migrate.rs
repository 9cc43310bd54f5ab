//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, MigrationStep};

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::open(&config, false).await?;

    let step = match args.action {
        MigrateAction::Status => {
            for migration in db.migration_status().await? {
                let state = if migration.applied { "applied" } else { "pending" };
                println!("{}: {}", migration.name, state);
            }
            return Ok(());
        }
        MigrateAction::Up => MigrationStep::Up,
        MigrateAction::Down => MigrationStep::Down,
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables before re-applying migrations");
            MigrationStep::Fresh
        }
    };

    db.migrate(step).await?;
    tracing::info!(?step, "Migration finished");

    Ok(())
}
