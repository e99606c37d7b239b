mod data_store;

pub mod cli;
pub mod cli_error;
pub mod setup;
pub mod web;
