//! Schema migrations for the venues, artists and shows tables, embedded into the binary
use crate::cli_error::CliError;
use crate::setup::DatabaseSettings;
use diesel::migration::Migration;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/postgresql");

fn connect(settings: &DatabaseSettings) -> Result<diesel::pg::PgConnection, CliError> {
    Ok(diesel::pg::PgConnection::establish(&settings.database_url)?)
}

/// Apply all pending migrations (`fyyur migrate-database`). Diesel's progress output goes to stdout.
pub fn run_migrations(settings: &DatabaseSettings) -> Result<(), CliError> {
    let mut connection = connect(settings)?;
    let mut harness = diesel_migrations::HarnessWithOutput::new(&mut connection, std::io::stdout());
    let applied = harness
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| CliError::Migration(e.to_string()))?;
    if applied.is_empty() {
        info!("Database schema is up to date.");
    } else {
        info!("Applied {} database migrations.", applied.len());
    }
    Ok(())
}

/// Refuse to continue with [CliError::MigrationPending] if the database schema lags behind the
/// migrations embedded in this binary. Checked before starting the web server.
pub fn check_migration_state(settings: &DatabaseSettings) -> Result<(), CliError> {
    let mut connection = connect(settings)?;
    let pending: Vec<String> = connection
        .pending_migrations(MIGRATIONS)
        .map_err(|e| CliError::Migration(e.to_string()))?
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    if pending.is_empty() {
        Ok(())
    } else {
        Err(CliError::MigrationPending(pending))
    }
}
