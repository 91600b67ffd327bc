//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use gradebook_server::db::{create_pool, migrations};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides .env files)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create or update the gradebook tables
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.gradebook/.env")?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    Ok(())
}
