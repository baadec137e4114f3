//! CLI module for AeroReg
//!
//! The CLI is the registry's hosting environment:
//! - init: create the data directory
//! - serve: answer JSON requests from stdin, one per line
//! - inspect: summarize the persisted snapshot

mod args;
mod commands;
mod config;
mod errors;
mod host;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, inspect, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use host::{Host, Request};
pub use io::{error_response, ok_response, write_line};
