use std::path::PathBuf;

use bytetree_core::FlattenStrategy;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bytetree",
    about = "Assemble byte sequences from files and strings, then flatten once",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Concatenate parts and write the flattened bytes
    Concat(ConcatArgs),
    /// Report the size and shape of the assembled builder
    Size(SizeArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum StrategyArg {
    TwoPass,
    Streaming,
    Gather,
}

impl From<StrategyArg> for FlattenStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::TwoPass => FlattenStrategy::TwoPass,
            StrategyArg::Streaming => FlattenStrategy::Streaming,
            StrategyArg::Gather => FlattenStrategy::Gather,
        }
    }
}

#[derive(Args)]
pub struct ConcatArgs {
    /// Parts in order: `@path` reads a file, anything else is literal text
    pub parts: Vec<String>,
    /// Text to prepend (repeatable; the last one ends up first)
    #[arg(long)]
    pub prepend: Vec<String>,
    /// Text to append (repeatable)
    #[arg(long)]
    pub append: Vec<String>,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Flatten configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the configured flatten strategy
    #[arg(long)]
    pub strategy: Option<StrategyArg>,
    /// Write leaves straight to the output without a contiguous buffer
    #[arg(long, conflicts_with_all = ["config", "strategy"])]
    pub direct: bool,
}

#[derive(Args)]
pub struct SizeArgs {
    /// Parts in order: `@path` reads a file, anything else is literal text
    pub parts: Vec<String>,
}
