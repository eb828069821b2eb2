//! Migrate command - applies or reverts the PostgreSQL schema

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::storage::{connect_pool, Migrator, PostgresConfig, PostgresMigrator};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration
    #[arg(long, conflicts_with = "status")]
    pub revert: bool,

    /// Print the applied schema version and exit
    #[arg(long)]
    pub status: bool,
}

/// Run the migrate command against the configured database
pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let url = config
        .storage
        .resolve_database_url()
        .context("storage.database_url or DATABASE_URL must be set to migrate")?;

    let pool = connect_pool(
        &PostgresConfig::new(url).with_max_connections(config.storage.max_connections),
    )
    .await?;
    let migrator = PostgresMigrator::new(pool);

    if args.status {
        match migrator.version().await? {
            Some(version) => info!("Schema version: {}", version),
            None => info!("No migrations applied"),
        }
    } else if args.revert {
        migrator.revert().await?;
        info!("Reverted to version {:?}", migrator.version().await?);
    } else {
        migrator.run().await?;
        info!("Schema up to date at version {:?}", migrator.version().await?);
    }

    Ok(())
}
