//! Command-line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Convert quantities between units.
///
/// Without a subcommand, reads `<quantity> -> <unit>` lines from stdin and
/// writes one result per line.
#[derive(Debug, Parser)]
#[command(name = "measura")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert quantities between units")]
pub struct Cli {
    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Unit table file (JSON) replacing the built-in tables
    #[arg(long, short = 'c', global = true, env = "MEASURA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Decimal places in rendered results
    #[arg(long, global = true)]
    pub precision: Option<usize>,

    /// Render exactly integral results without decimals
    #[arg(long, global = true)]
    pub exact: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a quantity, e.g. `convert "5 pounds" oz`
    Convert {
        input: String,
        target: String,
    },
    /// Parse a quantity without converting it
    Parse {
        input: String,
    },
    /// List units and aliases, optionally for one kind
    Units {
        kind: Option<String>,
    },
    /// Show the conversion rule between two units
    Rule {
        from: String,
        to: String,
    },
    /// List special conversion procedures
    Procedures {
        category: Option<String>,
    },
}
