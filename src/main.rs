//! gostrings - length-prefixed string extraction CLI
//!
//! Print every string literal a binary references through a
//! `(pointer, length)` descriptor, one per line, in byte order.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gostrings")]
#[command(
    author,
    version,
    about = "Extract length-prefixed string literals from ELF and Mach-O binaries"
)]
#[command(long_about = "
gostrings finds strings that are stored as a pointer plus an explicit length
rather than NUL-terminated, as Go and similar languages emit them. Each
aligned word pair in every section is treated as a candidate descriptor and
kept if it points at printable ASCII inside the binary.

EXAMPLES:
    gostrings ./server               # One string per line, sorted
    gostrings -m 8 ./server          # Only strings of 8 bytes or more
    gostrings --json ./server        # JSON array for tooling
")]
struct Cli {
    /// Target binary file to analyze
    #[arg(required = true)]
    target: String,

    /// Minimum string length to extract
    #[arg(short = 'm', long, default_value = "4")]
    min_length: usize,

    /// Maximum string length to extract
    #[arg(long, default_value = "2048")]
    max_length: usize,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Log scan progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // warn by default, --verbose enables debug, RUST_LOG overrides both
    let default_level = if cli.verbose { "gostrings=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();

    let path = Path::new(&cli.target);
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", cli.target);
    }

    let data = fs::read(path).with_context(|| format!("failed to read {}", cli.target))?;

    let opts = gostrings::ExtractOptions::new()
        .with_min_length(cli.min_length)
        .with_max_length(cli.max_length);
    let strings = gostrings::extract_strings_with_options(&data, &opts)
        .with_context(|| format!("cannot extract strings from {}", cli.target))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &strings)?;
        writeln!(out)?;
    } else {
        for s in &strings {
            writeln!(out, "{}", s)?;
        }
    }
    out.flush()?;

    Ok(())
}
