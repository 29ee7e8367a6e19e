//! user_ledger - interactive CLI
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────────┐    ┌────────────┐
//! │  Args +  │───▶│ Database │───▶│    Shell     │───▶│ PostgreSQL │
//! │  Config  │    │  (pool)  │    │ store/engine │    │   users    │
//! └──────────┘    └──────────┘    └──────────────┘    └────────────┘
//! ```
//!
//! Exits non-zero only when startup fails (config, initial connection).

use anyhow::Context;

use user_ledger::cli::{self, Shell};
use user_ledger::db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::parse_args();
    let app_config = args.load_config().context("load config")?;
    let _log_guard = user_ledger::logging::init_logging(&app_config);

    tracing::info!(
        env = %args.env,
        version = cli::args::VERSION,
        lock_order = %app_config.transfer.lock_order,
        "Starting user_ledger"
    );

    let database_url = app_config
        .database_url(args.database_url.as_deref())
        .context("resolve database url")?;
    let db = Database::connect(&database_url, &app_config.database)
        .await
        .context("db init")?;

    if args.init_schema {
        db.ensure_schema().await.context("init schema")?;
    }

    println!("Connected to DB. Starting CLI.");
    let shell = Shell::from_database(&db, &app_config.transfer);
    let result = shell.run_stdio().await;

    db.close().await;
    tracing::info!("Shutting down");
    println!("exiting");
    result.context("terminal i/o")
}
