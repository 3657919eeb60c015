//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "panel-notation",
    version,
    about = "Normalize panel machining notation into canonical services",
    long_about = "Normalize edge banding, groove, drilling and CNC notation into canonical \
                  services.\n\n\
                  Organization dialects are JSON or TOML overlays merged onto the built-in \
                  default."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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
    /// Normalize the services of one part written as free text.
    Normalize(NormalizeArgs),

    /// Normalize every row of a CSV cut list.
    CutList(CutListArgs),

    /// Show which family a code belongs to and what it means.
    Decode(DecodeArgs),

    /// Print the merged dialect as JSON.
    Dialect(DialectArgs),
}

/// Dialect and normalization switches shared by the normalizing commands.
#[derive(Args)]
pub struct NormalizeFlags {
    /// Dialect overlay file (.json or .toml) merged onto the default.
    #[arg(long = "dialect", value_name = "FILE", env = "PANEL_DIALECT")]
    pub dialect: Option<PathBuf>,

    /// Do not fall back to natural-language recognition.
    #[arg(long = "no-heuristics")]
    pub no_heuristics: bool,

    /// Skip validation of the normalized services.
    #[arg(long = "no-validate")]
    pub no_validate: bool,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Service notation, e.g. "2L2W, GL-4-10, 2 hinges".
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Part length in mm, for hinge counts and lengths.
    #[arg(long = "length", value_name = "MM", requires = "width")]
    pub length: Option<f64>,

    /// Part width in mm.
    #[arg(long = "width", value_name = "MM", requires = "length")]
    pub width: Option<f64>,

    #[command(flatten)]
    pub flags: NormalizeFlags,
}

#[derive(Args)]
pub struct CutListArgs {
    /// CSV cut list with one header row.
    #[arg(value_name = "CSV")]
    pub path: PathBuf,

    #[command(flatten)]
    pub flags: NormalizeFlags,
}

#[derive(Args)]
pub struct DecodeArgs {
    /// A shortcode, optionally with an @override suffix.
    #[arg(value_name = "CODE")]
    pub code: String,
}

#[derive(Args)]
pub struct DialectArgs {
    /// Dialect overlay file (.json or .toml) merged onto the default.
    #[arg(long = "dialect", value_name = "FILE", env = "PANEL_DIALECT")]
    pub dialect: Option<PathBuf>,
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
