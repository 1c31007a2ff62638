//! Database settings shared by every subcommand
//!
//! Resolution order for the database URL: `--database-url`, then the
//! `DATABASE_URL` environment variable (a `.env` file is loaded at startup),
//! then the built-in default.

use anyhow::{Context, Result};
use clap::Args;
use postboard_server::db::{create_pool_with_options, migrations, SqlitePool, DEFAULT_DATABASE_URL};

/// Database connection arguments
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Database URL (sqlite://path/to/file.db or sqlite::memory:)
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, env = "POSTBOARD_MAX_CONNECTIONS", default_value = "5")]
    pub max_connections: u32,
}

impl DbArgs {
    /// Open the pool and bring the schema up to date.
    pub async fn connect(&self) -> Result<SqlitePool> {
        tracing::info!(database = %self.database_url, "Opening database");

        let pool = create_pool_with_options(&self.database_url, self.max_connections)
            .await
            .with_context(|| format!("Failed to open database at {}", self.database_url))?;

        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(pool)
    }
}
