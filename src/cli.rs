use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::io_utils::InputFormat;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Translate parsed network-device records into validated models",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Translate a batch of parsed records into validated models
    Translate(TranslateArgs),
    /// Report which input schema matches the first record of a batch
    Detect(DetectArgs),
    /// List registered record types and their input schemas
    Schemas(SchemasArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
    Csv,
}

#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Input file of parsed records (JSON, YAML or CSV; use - for stdin)
    #[arg(short, long)]
    pub input: PathBuf,
    /// Record type to translate into (e.g. cdp_neighbors, arp)
    #[arg(short = 't', long = "record-type")]
    pub record_type: String,
    /// Use this input schema instead of detecting one from the first record
    #[arg(short, long)]
    pub schema: Option<String>,
    /// Format of the input file; inferred from the extension when omitted
    #[arg(long = "input-format", value_enum)]
    pub input_format: Option<InputFormat>,
    /// Additional YAML schema definition files (repeatable)
    #[arg(short = 'd', long = "definitions", action = clap::ArgAction::Append)]
    pub definitions: Vec<PathBuf>,
    /// Rendering of the translated models
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Fail when any record is dropped instead of reporting and continuing
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct DetectArgs {
    /// Input file of parsed records (JSON, YAML or CSV; use - for stdin)
    #[arg(short, long)]
    pub input: PathBuf,
    /// Record type whose schemas are candidates
    #[arg(short = 't', long = "record-type")]
    pub record_type: String,
    /// Format of the input file; inferred from the extension when omitted
    #[arg(long = "input-format", value_enum)]
    pub input_format: Option<InputFormat>,
    /// Additional YAML schema definition files (repeatable)
    #[arg(short = 'd', long = "definitions", action = clap::ArgAction::Append)]
    pub definitions: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SchemasArgs {
    /// Only list schemas for this record type
    #[arg(short = 't', long = "record-type")]
    pub record_type: Option<String>,
    /// Show the declared fields of each record type instead of its schemas
    #[arg(long)]
    pub fields: bool,
    /// Additional YAML schema definition files (repeatable)
    #[arg(short = 'd', long = "definitions", action = clap::ArgAction::Append)]
    pub definitions: Vec<PathBuf>,
}
