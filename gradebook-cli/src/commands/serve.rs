//! HTTP server command
//!
//! Runs the gradebook HTTP API over Postgres, or over an in-memory store
//! with `--in-memory`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use gradebook_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use gradebook_server::db::{create_pool_with_options, migrations, GradebookStore, MemoryStore, PgStore};
use gradebook_server::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "GRADEBOOK_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides .env files)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub request_timeout: u64,

    /// Keep all data in memory, ignoring any database URL
    #[arg(long)]
    pub in_memory: bool,

    /// Skip schema migrations on startup
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn GradebookStore> = if args.in_memory {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let database_url = args.database_url.context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.gradebook/.env",
        )?;

        let pool = create_pool_with_options(&database_url, args.max_connections)
            .await
            .context("Failed to create database pool")?;

        if !args.skip_migrations {
            migrations::run(&pool)
                .await
                .context("Failed to run migrations")?;
        }

        Arc::new(PgStore::new(pool))
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.request_timeout),
    };

    tracing::info!(bind = %config.bind_addr, "Starting gradebook server");

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
