//! CLI type definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// OCDS mapping sheet command-line interface
#[derive(Parser, Debug)]
#[command(name = "ocdsmap", version, about = "OCDS field-level mapping sheet tools")]
pub struct OcdsMapCli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: OcdsMapCommand,
}

/// `ocdsmap` subcommands
#[derive(Subcommand, Debug)]
pub enum OcdsMapCommand {
    /// Generate the mapping sheet workbook from a patched release schema
    Generate {
        /// Release schema: a local path or an HTTP(S) URL
        schema: String,
        /// The ocdskit mapping-sheet CSV
        #[arg(short, long, default_value = "mapping-sheet.csv")]
        mapping_sheet: PathBuf,
        /// Output directory for the CSV files
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
        /// Output language (overrides the configuration file)
        #[arg(short, long)]
        lang: Option<String>,
        /// JSON file with extension name to description entries
        #[arg(long)]
        extension_descriptions: Option<PathBuf>,
        /// JSON string table overriding the built-in translations
        #[arg(long)]
        strings: Option<PathBuf>,
        /// JSON generator configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the flattened schema fields
    Fields {
        /// Release schema: a local path or an HTTP(S) URL
        schema: String,
        /// Include deprecated fields
        #[arg(long)]
        deprecated: bool,
    },

    /// Print the string table for a language
    Strings {
        /// Language to print
        #[arg(short, long, default_value = "en")]
        lang: String,
    },
}
