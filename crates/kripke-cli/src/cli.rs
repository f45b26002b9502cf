//! CLI argument definitions for the `kripke` command.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use kripke_cli::model_args::{EdgeSpec, WorldSpec};

#[derive(Parser)]
#[command(
    name = "kripke",
    version,
    about = "Modal logic workbench - evaluate, prove and minimise over Kripke models",
    long_about = "Parse formulas of basic modal logic, evaluate them in Kripke models,\n\
                  decide validity and satisfiability with a semantic tableau and\n\
                  minimise models up to bisimulation.\n\n\
                  Formula syntax: not F | poss F | nec F | (F and F) | (F or F) | (F then F) | atom"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
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
    /// Show a formula in symbolic, LaTeX and grammar form.
    Parse(ParseArgs),

    /// Evaluate a formula at a world of a model given on the command line.
    Eval(EvalArgs),

    /// Decide validity; prints a countermodel when the formula is not valid.
    Prove(SearchArgs),

    /// Decide satisfiability; prints a model when one exists.
    Sat(SearchArgs),

    /// Collapse bisimilar worlds of a model.
    Reduce(ReduceArgs),

    /// Relate the worlds of two models by their largest bisimulation.
    Bisim(BisimArgs),
}

#[derive(Parser)]
pub struct ParseArgs {
    #[arg(value_name = "FORMULA")]
    pub formula: String,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct ModelArgs {
    /// A world, as NAME or NAME=atom,atom. Repeat for more worlds.
    #[arg(long = "world", value_name = "NAME[=ATOMS]", required = true)]
    pub worlds: Vec<WorldSpec>,

    /// An edge of the default relation between two named worlds.
    #[arg(long = "edge", value_name = "FROM:TO")]
    pub edges: Vec<EdgeSpec>,

    /// The selected world (default: the first declared world).
    #[arg(long = "at", value_name = "NAME")]
    pub at: Option<String>,
}

#[derive(Parser)]
pub struct EvalArgs {
    #[arg(value_name = "FORMULA")]
    pub formula: String,

    #[command(flatten)]
    pub model: ModelArgs,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct SearchArgs {
    #[arg(value_name = "FORMULA")]
    pub formula: String,

    /// Abort the search after this many proof-tree nodes.
    #[arg(long = "max-nodes", value_name = "N", default_value_t = kripke_tableau::config::DEFAULT_MAX_NODES)]
    pub max_nodes: usize,

    /// Search without a node ceiling.
    #[arg(long = "unbounded", conflicts_with = "max_nodes")]
    pub unbounded: bool,

    /// Minimise the resulting model by bisimulation.
    #[arg(long = "reduce")]
    pub reduce: bool,

    /// Print the proof tree.
    #[arg(long = "tree")]
    pub tree: bool,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct ReduceArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct BisimArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// A world of the second model.
    #[arg(long = "other-world", value_name = "NAME[=ATOMS]", required = true)]
    pub other_worlds: Vec<WorldSpec>,

    /// An edge of the second model.
    #[arg(long = "other-edge", value_name = "FROM:TO")]
    pub other_edges: Vec<EdgeSpec>,

    /// The selected world of the second model.
    #[arg(long = "other-at", value_name = "NAME")]
    pub other_at: Option<String>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

/// Command output format.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
