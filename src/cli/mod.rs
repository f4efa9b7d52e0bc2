//! CLI support for petrel
//!
//! Command parsing and execution live in [commands]; the interactive
//! prompting flows live in [repl]. Everything here is compiled only under
//! the `cli` feature.

mod commands;
mod repl;

pub use commands::{parse_command, run_line, run_piped, Command, Flow, Session};
pub use repl::run_repl;

use std::io;

use rustyline::error::ReadlineError;

use crate::error::{QueryError, StoreError};

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Query pipeline error
    Query(QueryError),
    /// Table file error
    Store(StoreError),
    /// IO error
    Io(io::Error),
    /// Line editor error
    Readline(ReadlineError),
    /// A command line that does not fit the grammar
    Usage(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Query(e) => write!(f, "Query error: {}", e),
            CliError::Store(e) => write!(f, "Table error: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Readline(e) => write!(f, "Readline error: {}", e),
            CliError::Usage(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Query(e) => Some(e),
            CliError::Store(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Readline(e) => Some(e),
            CliError::Usage(_) => None,
        }
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        CliError::Query(e)
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Store(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<ReadlineError> for CliError {
    fn from(e: ReadlineError) -> Self {
        CliError::Readline(e)
    }
}
