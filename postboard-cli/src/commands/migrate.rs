//! Schema-only command: create the database file and tables, then exit.

use anyhow::Result;
use clap::Parser;

use crate::config::DbArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = args.db.connect().await?;
    pool.close().await;

    tracing::info!(database = %args.db.database_url, "Database is up to date");
    Ok(())
}
