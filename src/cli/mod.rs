//! CLI command definitions and parsing
use crate::transport::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "holehe-maltego",
    version,
    author = "neur0map",
    about = "Maltego transform that checks where an email address is registered using holehe",
    long_about = "Runs holehe against one email address, parses its output and writes the findings \
                  to stdout as a Maltego transform response. Logs go to stderr."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/holehe-maltego/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the holehe executable (overrides tool.binary)
    #[arg(long, global = true, value_name = "PATH")]
    pub binary: Option<PathBuf>,

    /// Seconds to wait for holehe before giving up (overrides tool.timeout_secs)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Response document format (overrides output.format)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Local transform: the email is the first argument
    Local {
        /// Email address to check
        email: Option<String>,

        /// Entity properties Maltego appends after the value (ignored)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        extra: Vec<String>,
    },

    /// Read a transform request message from stdin, falling back to the argument
    Trx {
        /// Email address used when stdin carries no request
        email: Option<String>,
    },

    /// Classify previously captured holehe output without running holehe
    Parse {
        /// Email the output belongs to
        #[arg(short, long)]
        email: String,

        /// File with captured output (defaults to stdin)
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
