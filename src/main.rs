//! # cinema-db - shared database bootstrap for the cinema backend
//!
//! ## Environment Variables
//!
//! - `DATABASE_URL` or `MONGODB_URL`: MongoDB connection string
//! - `MONGODB_SERVER_SELECTION_TIMEOUT_MS`: upper bound for the initial connect (optional)
//! - `MONGODB_APP_NAME`: application name reported to the server (optional)
//! - `RUST_LOG`: log filter, defaults to `info`

use cinema_db::{build_rocket, cli, config::ConnectionConfig, db::global, telemetry};

/// Starts the server. The database connection is attempted in the background, so the
/// server comes up whether or not the database is reachable.
///
/// If command-line arguments are provided, handles the CLI command instead.
#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    if std::env::args().len() > 1 {
        return cli::handle_cli().await;
    }

    let config = ConnectionConfig::from_env()?;
    let db = global::init(config);

    build_rocket(db.clone()).launch().await?;

    Ok(())
}
