use crate::data_store::StoreError;
use crate::setup::SetupError;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Error of a `fyyur` command, mapped to the process exit code by [CliError::exit_code]
#[derive(Debug)]
pub enum CliError {
    /// Environment variables are missing or invalid
    Setup(SetupError),
    /// The database server is not reachable
    DatabaseConnection(String),
    /// A data store operation failed unexpectedly
    Store(StoreError),
    /// Binding the web server to the configured address and port failed
    Bind(std::io::Error),
    /// The web server terminated with an io error
    Server(std::io::Error),
    /// Applying or checking the database schema migrations failed
    Migration(String),
    /// The web server must not be started, because database schema migrations are pending
    MigrationPending(Vec<String>),
    /// A data file could not be read or written
    File {
        path: PathBuf,
        error: std::io::Error,
    },
    /// The directory data in a data file is invalid
    InvalidData(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Setup(_) | CliError::File { .. } | CliError::InvalidData(_) => 1,
            CliError::Store(_) => 2,
            CliError::Bind(_) | CliError::Server(_) => 3,
            CliError::DatabaseConnection(_) | CliError::Migration(_) => 4,
            CliError::MigrationPending(_) => 5,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Setup(e) => write!(f, "Setup invalid: {}", e),
            CliError::DatabaseConnection(e) => write!(f, "Could not connect to database: {}", e),
            CliError::Store(e) => write!(f, "Data store operation failed: {}", e),
            CliError::Bind(e) => write!(f, "Could not bind web server socket: {}", e),
            CliError::Server(e) => write!(f, "Web server failed: {}", e),
            CliError::Migration(e) => write!(f, "Database migration failed: {}", e),
            CliError::MigrationPending(migrations) => write!(
                f,
                "Database migration required. Run `fyyur migrate-database` first. Pending migrations: {}",
                migrations.join(", ")
            ),
            CliError::File { path, error } => write!(f, "Could not access {:?}: {}", path, error),
            CliError::InvalidData(e) => write!(f, "Invalid directory data: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ConnectionError(e) => Self::DatabaseConnection(e),
            // Foreign key violations while importing, e.g. a show referencing an unknown venue
            StoreError::InvalidInputData(e) => Self::InvalidData(e),
            StoreError::ConflictEntityExists => {
                Self::InvalidData("duplicate show for the same artist and venue".to_owned())
            }
            e => Self::Store(e),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidData(value.to_string())
    }
}

impl From<SetupError> for CliError {
    fn from(value: SetupError) -> Self {
        Self::Setup(value)
    }
}

impl From<diesel::ConnectionError> for CliError {
    fn from(value: diesel::ConnectionError) -> Self {
        Self::DatabaseConnection(value.to_string())
    }
}
