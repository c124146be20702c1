use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use pathwalk::config::Config;
use pathwalk::tree::loader::{load_file, load_from_stdin};
use pathwalk::Selector;

/// Pathwalk - search JSON and YAML documents by path pattern
#[derive(Parser)]
#[command(name = "pathwalk")]
#[command(version)]
#[command(about = "Search JSON and YAML documents by path pattern", long_about = None)]
struct Cli {
    /// Pattern to search for, e.g. '$.pets[*].name'
    pattern: String,

    /// JSON or YAML file to search (omit to read from stdin)
    file: Option<PathBuf>,

    /// Print the path of each match before its id
    #[arg(long)]
    paths: bool,

    /// Stop after this many matches
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Print only the number of matches
    #[arg(short, long)]
    count: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log every traversal step
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::load();

    let filter = if cli.trace {
        EnvFilter::new("pathwalk=trace")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(cli, config) {
        Ok(0) => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            report_error(&mut io::stderr(), &e);
            ExitCode::from(2)
        }
    }
}

/// Writes a fatal error and its causes to `out`, independent of the log
/// filter.
fn report_error<W: Write>(out: &mut W, err: &anyhow::Error) {
    let _ = writeln!(out, "Error: {:#}", err);
}

/// Runs the search and returns the number of matches printed.
fn run(cli: Cli, config: Config) -> Result<usize> {
    let selector = Selector::new(&cli.pattern)
        .with_context(|| format!("Invalid pattern '{}'", cli.pattern))?;

    let root = match &cli.file {
        Some(path) => load_file(path)?,
        None => {
            if io::stdin().is_terminal() {
                bail!("No input: pass a FILE or pipe a document into stdin");
            }
            load_from_stdin()?
        }
    };

    let show_paths = cli.paths || config.show_paths;
    let limit = cli.limit.or(config.limit).unwrap_or(usize::MAX);
    debug!(pattern = %selector, limit, "starting search");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut found = 0;

    for result in selector.find(&root).take(limit) {
        let found_match = result.context("Search aborted")?;
        found += 1;
        if cli.count {
            continue;
        }
        if show_paths {
            writeln!(out, "{}\t{}", found_match.path(), found_match.node())?;
        } else {
            writeln!(out, "{}", found_match.node())?;
        }
    }

    if cli.count {
        writeln!(out, "{}", found)?;
    }
    out.flush()?;

    Ok(found)
}
