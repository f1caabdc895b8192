//! CLI argument definitions for dds2define.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dds2define",
    version,
    about = "Generate CDISC Define-XML v2.1 from a Data Definition Specification",
    long_about = "Convert a Data Definition Specification (DDS) JSON file into a\n\
                  Define-XML v2.1 submission document.\n\n\
                  Supports optional post-generation schema validation via xmllint\n\
                  and a separate condition-flattening pass for two-stage pipelines."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a Define-XML v2.1 file from a DDS JSON file.
    Generate(GenerateArgs),

    /// Flatten the conditions section into a stash file for a later
    /// generate pass.
    Conditions(ConditionsArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Path to the DDS JSON file.
    #[arg(value_name = "DDS_FILE")]
    pub dds_file: PathBuf,

    /// Output Define-XML path (default: <DDS_FILE> with .xml extension).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Load a condition stash produced by a prior `conditions` pass instead
    /// of relying solely on the inline conditions section.
    #[arg(long = "conditions-file", value_name = "PATH")]
    pub conditions_file: Option<PathBuf>,

    /// Schema-validate the generated file after writing it.
    #[arg(long = "validate", requires = "schema")]
    pub validate: bool,

    /// Define-XML XSD to validate against.
    #[arg(long = "schema", value_name = "XSD")]
    pub schema: Option<PathBuf>,

    /// Value for the def:Context root attribute.
    #[arg(long = "context", default_value = "Submission")]
    pub context: String,

    /// Authority URL recorded on placeholder external-dictionary references
    /// synthesized for term-less codelists.
    #[arg(long = "dictionary-href", default_value = "https://www.iso.org")]
    pub dictionary_href: String,

    /// Version recorded on placeholder external-dictionary references.
    #[arg(long = "dictionary-version", default_value = "1.0")]
    pub dictionary_version: String,
}

#[derive(Parser)]
pub struct ConditionsArgs {
    /// Path to the DDS JSON file.
    #[arg(value_name = "DDS_FILE")]
    pub dds_file: PathBuf,

    /// Output path for the flattened condition stash.
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
