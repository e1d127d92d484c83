//! CLI module for the relational-model-cli binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
