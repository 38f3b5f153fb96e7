//! Command-line front end for blogmark: single and bulk article conversion.

pub mod cli;
pub mod commands;
pub mod console;
pub mod repl;

pub use cli::{BulkArgs, Cli, Command, FetchArgs};
