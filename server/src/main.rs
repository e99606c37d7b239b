use clap::ArgAction;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use fyyur_server::cli::{database_migration, file_io};
use fyyur_server::cli_error::CliError;
use fyyur_server::setup::{DatabaseSettings, ServerSettings};
use log::{error, warn};
use std::path::PathBuf;

fn main() {
    let args = CliArgs::parse();
    let dotenv_result = dotenv();

    env_logger::Builder::from_env(
        env_logger::Env::new().filter_or("RUST_LOG", args.global_opts.default_log_level()),
    )
    .init();
    if let Err(e) = dotenv_result {
        warn!("Could not read .env file: {}", e);
    }

    let result = run_command(args.command);
    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run_command(command: Command) -> Result<(), CliError> {
    let database = DatabaseSettings::from_env()?;
    match command {
        Command::Serve => {
            let server = ServerSettings::from_env()?;
            database_migration::check_migration_state(&database)?;
            fyyur_server::web::serve(&database, server)
        }
        Command::MigrateDatabase => database_migration::run_migrations(&database),
        Command::LoadData { path } => file_io::load_directory_from_file(&database, &path),
        Command::ExportData { path } => file_io::export_directory_to_file(&database, &path),
    }
}

/// Fyyur: a directory of music venues and artists for booking shows
#[derive(Debug, Parser)]
#[clap(name = "fyyur", version)]
pub struct CliArgs {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the Fyyur web application
    Serve,
    /// Apply all pending database schema migrations
    MigrateDatabase,
    /// Import venues, artists and shows from a JSON file
    LoadData {
        /// The path of the JSON file to read from
        path: PathBuf,
    },
    /// Export all venues, artists and shows to a JSON file
    ExportData {
        /// The path of the JSON file to write to
        path: PathBuf,
    },
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace). RUST_LOG takes precedence.
    #[clap(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,
}

impl GlobalOpts {
    fn default_log_level(&self) -> &'static str {
        ["warn", "info", "debug"]
            .get(usize::from(self.verbose))
            .copied()
            .unwrap_or("trace")
    }
}
