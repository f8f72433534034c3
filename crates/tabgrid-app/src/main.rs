// ABOUTME: Main application entry point.
// ABOUTME: Loads config, sets up logging, and feeds commands to the layout engine.

mod driver;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use driver::OutputMode;
use tabgrid_core::Config;
use tabgrid_layout::ContainerStateMachine;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: tabgrid [--config <path>] [--placements] [--init-config] [script.jsonl]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    output: OutputMode,
    init_config: bool,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--placements" => parsed.output = OutputMode::Placements,
            "--init-config" => parsed.init_config = true,
            "-h" | "--help" => bail!("{USAGE}"),
            flag if flag.starts_with('-') => bail!("unknown option {flag}\n{USAGE}"),
            path => {
                if parsed.script.is_some() {
                    bail!("only one script may be given\n{USAGE}");
                }
                parsed.script = Some(PathBuf::from(path));
            }
        }
    }
    Ok(parsed)
}

fn init_tracing(level: &str) {
    // Logs go to stderr; stdout carries only JSON reports.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_or_default(),
    };
    init_tracing(&config.log_level);

    if args.init_config {
        let path = config.save_to_default()?;
        tracing::info!("Wrote config to {}", path.display());
        return Ok(());
    }

    tracing::info!(
        "Starting tabgrid: viewport {}x{}, min track {}px",
        config.viewport.width,
        config.viewport.height,
        config.min_track_size
    );
    let mut machine = ContainerStateMachine::from_config(&config);

    let stdout = io::stdout().lock();
    let summary = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            driver::run(&mut machine, BufReader::new(file), stdout, args.output)?
        }
        None => driver::run(&mut machine, io::stdin().lock(), stdout, args.output)?,
    };

    tracing::info!(
        "Finished: {} applied, {} rejected, {} malformed",
        summary.applied,
        summary.rejected,
        summary.malformed
    );
    Ok(())
}
