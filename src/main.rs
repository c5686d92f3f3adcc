use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use probenorm_core::config::Config;
use probenorm_core::{export, normalize_output, Options};

#[derive(Parser)]
#[command(name = "probenorm", about = "Normalize raw probe output into test results")]
struct Cli {
    /// Probe output file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Config file with `[parser]` and `[hosts]` sections.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra host alias, `target=location`. May be repeated.
    #[arg(long = "alias", value_parser = parse_alias)]
    aliases: Vec<(String, String)>,

    /// Fail on the first malformed record instead of dropping it.
    #[arg(long)]
    strict: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Jsonl)]
    format: OutputFormat,

    /// Log at debug level to stderr.
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Jsonl,
    Text,
}

fn parse_alias(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((target, location)) if !target.is_empty() => {
            Ok((target.to_string(), location.to_string()))
        }
        _ => Err(format!("expected target=location, got {s:?}")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    for (target, location) in cli.aliases {
        config.hosts.insert(target, location);
    }
    let mut options = Options::from(config.parser.clone());
    options.strict |= cli.strict;

    let blob = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let batch = normalize_output(&blob, &options, &config.hosts)?;
    for dropped in &batch.dropped {
        tracing::info!(index = dropped.index, reason = ?dropped.reason, "record dropped");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Jsonl => export::write_jsonl(&mut out, &batch.entities)?,
        OutputFormat::Text => out.write_all(export::to_text(&batch.entities).as_bytes())?,
    }
    out.flush()?;
    Ok(())
}
