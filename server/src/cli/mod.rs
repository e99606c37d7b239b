//! Implementations of the command line subcommands, apart from serving the web application (see
//! [crate::web::serve]).
pub mod database_migration;
pub mod file_io;
