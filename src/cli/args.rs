//! CLI argument definitions using clap
//!
//! Commands:
//! - aeroreg init --config <path>
//! - aeroreg serve --config <path>
//! - aeroreg inspect --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AeroReg - a strict, deterministic content-registration registry
#[derive(Parser, Debug)]
#[command(name = "aeroreg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./aeroreg.json")]
        config: PathBuf,
    },

    /// Serve JSON requests from stdin, one per line
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./aeroreg.json")]
        config: PathBuf,
    },

    /// Print a summary of the persisted registry
    Inspect {
        /// Path to configuration file
        #[arg(long, default_value = "./aeroreg.json")]
        config: PathBuf,
    },
}

impl Command {
    pub fn config_path(&self) -> &PathBuf {
        match self {
            Command::Init { config }
            | Command::Serve { config }
            | Command::Inspect { config } => config,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
