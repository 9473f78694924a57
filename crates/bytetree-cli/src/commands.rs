use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::Bytes;
use bytetree_core::{Builder, FlattenConfig};
use colored::Colorize;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Concat(args) => cmd_concat(args),
        Command::Size(args) => cmd_size(args, cli.format),
    }
}

/// One command-line part: a file to read or literal text.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Part {
    File(PathBuf),
    Text(String),
}

impl Part {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix('@') {
            Some(path) if !path.is_empty() => Self::File(PathBuf::from(path)),
            _ => Self::Text(raw.to_string()),
        }
    }

    fn into_builder(self) -> anyhow::Result<Builder> {
        match self {
            Self::File(path) => {
                let data = std::fs::read(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                debug!(path = %path.display(), bytes = data.len(), "read part");
                Ok(Builder::from_bytes(Bytes::from(data)))
            }
            Self::Text(text) => Ok(Builder::from_string(text)),
        }
    }
}

fn assemble(parts: &[String]) -> anyhow::Result<Builder> {
    let leaves = parts
        .iter()
        .map(|raw| Part::parse(raw).into_builder())
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Builder::concat(leaves))
}

fn resolve_config(path: Option<&Path>, strategy: Option<StrategyArg>) -> anyhow::Result<FlattenConfig> {
    let mut config = match path {
        Some(path) => FlattenConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => FlattenConfig::default(),
    };
    if let Some(strategy) = strategy {
        config.strategy = strategy.into();
    }
    Ok(config)
}

fn build_concat(args: &ConcatArgs) -> anyhow::Result<Builder> {
    let mut builder = assemble(&args.parts)?;
    for text in &args.prepend {
        builder = builder.prepend_string(text.as_str());
    }
    for text in &args.append {
        builder = builder.append_string(text.as_str());
    }
    Ok(builder)
}

fn cmd_concat(args: ConcatArgs) -> anyhow::Result<()> {
    let builder = build_concat(&args)?;

    let written = if args.direct {
        match &args.output {
            Some(path) => {
                let file = std::fs::File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                builder.write_to(std::io::BufWriter::new(file))?
            }
            None => builder.write_to(std::io::stdout().lock())?,
        }
    } else {
        let config = resolve_config(args.config.as_deref(), args.strategy)?;
        let bytes = builder.to_bytes_with(&config);
        match &args.output {
            Some(path) => std::fs::write(path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&bytes)?;
                stdout.flush()?;
            }
        }
        bytes.len()
    };

    if let Some(path) = &args.output {
        eprintln!(
            "{} Wrote {} bytes to {}",
            "✓".green().bold(),
            written.to_string().bold(),
            path.display()
        );
    }
    Ok(())
}

fn cmd_size(args: SizeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let builder = assemble(&args.parts)?;
    let bytes = builder.checked_byte_size()?;
    let leaves = builder.leaf_count();
    let nodes = builder.node_count();
    match format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "bytes": bytes,
                "leaves": leaves,
                "nodes": nodes,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("Bytes:  {}", bytes.to_string().bold());
            println!("Leaves: {}", leaves.to_string().cyan());
            println!("Nodes:  {}", nodes.to_string().cyan());
        }
    }
    Ok(())
}
