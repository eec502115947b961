use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use infection_cli::config::TrackerConfig;
use infection_cli::logging::init_logging;
use infection_cli::render::render_table;
use infection_cli::session::Session;
use infection_core::AppInfo;
use infection_core::game::{Tracker, TrackerReport};

/// Infection deck odds calculator.
#[derive(Debug, Parser)]
#[command(
    name = "infection-odds",
    author,
    version,
    about = "Tracks the infection deck across epidemics and reports draw odds"
)]
struct Cli {
    /// Path to an optional YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read commands from a file instead of stdin.
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Print the final report as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Override the configured tracing level.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => TrackerConfig::from_path(path)?,
        None => TrackerConfig::default(),
    };

    if let Some(level) = cli.log_level {
        config.logging.tracing_level = level;
    }

    config.validate()?;
    let _logging_guard = init_logging(&config.logging)?;

    let deck = config.deck();
    tracing::info!(
        target: "infection_cli",
        app = AppInfo::name(),
        codename = AppInfo::codename(),
        version = AppInfo::version(),
        cities = deck.len(),
        cards = deck.total_count(),
        "session started"
    );

    let mut session = Session::new(Tracker::new(deck));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.script.as_ref() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening script at {}", path.display()))?;
            session.run(BufReader::new(file), &mut out)?;
        }
        None => {
            session.run(io::stdin().lock(), &mut out)?;
        }
    }

    let tracker = session.into_tracker();
    if cli.json {
        let json = TrackerReport::to_json(&tracker).context("serializing final report")?;
        writeln!(out, "{json}")?;
    } else {
        write!(out, "{}", render_table(&tracker.report()))?;
    }
    Ok(())
}
