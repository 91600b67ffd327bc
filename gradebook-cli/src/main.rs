//! gradebook CLI - runs the gradebook HTTP API
//!
//! Subcommands:
//! - `serve`: start the HTTP server (Postgres or in-memory store)
//! - `migrate`: create the gradebook tables

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "gradebook",
    author,
    version,
    about = "Student gradebook HTTP server",
    long_about = "Manage students and their math, science and history grades over HTTP. \
                  Per-subject averages are computed from the stored grades on every read."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create or update the database schema
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so .env values feed clap's `env` fallbacks
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();

    if env_files.is_empty() {
        tracing::debug!("No .env files found (current dir or ~/.gradebook)");
    } else {
        for path in &env_files {
            tracing::info!("Loaded configuration from {}", path.display());
        }
    }

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
