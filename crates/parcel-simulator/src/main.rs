//! `parcel-simulator` — process entry point.
//!
//! Generates a synthetic package-tracking event stream: loads the logistics
//! network and the active-package population from the store, simulates each
//! package's journey on worker threads, and writes the resulting scan events
//! to per-worker sink files.  SIGINT/SIGTERM drain the run cooperatively; a
//! fresh start rebuilds the remaining population from the store.

mod settings;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use parcel_output::{CsvProducer, JsonLinesProducer};
use parcel_sim::{RunSummary, ShutdownFlag, SimError, SimResult, run_simulation};
use parcel_store::SqliteStore;
use parcel_track::trackers_from_records;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "parcel-simulator", version, about = "Synthetic package-tracking event simulator")]
struct Cli {
    /// TOML configuration file; repeatable, later files override earlier ones.
    #[arg(long = "config", value_name = "PATH")]
    config: Vec<PathBuf>,

    /// Simulator id (wins over SIMULATOR_ID and config files).
    #[arg(long = "id", value_name = "ID")]
    id: Option<String>,

    /// SQLite database holding `locations` and `active_packages`.
    #[arg(long, value_name = "PATH", default_value = "parcel.db")]
    store: PathBuf,

    /// Event sink path; worker `n` writes `<stem>-<n><extension>`.
    #[arg(long, value_name = "PATH", default_value = "events.csv")]
    events: PathBuf,

    /// Event file format.
    #[arg(long, value_enum, default_value = "csv")]
    format: EventFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum EventFormat {
    /// One CSV row per event.
    Csv,
    /// Newline-delimited JSON objects.
    Jsonl,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = settings::load(&cli.config, cli.id.as_deref())?;

    let shutdown = ShutdownFlag::new();
    {
        let flag = shutdown.clone();
        ctrlc::set_handler(move || {
            // Second and later signals are no-ops; workers drain on their own.
            if flag.signal() {
                eprintln!("shutdown requested, stopping workers");
            }
        })
        .context("installing signal handler")?;
    }

    let store_path = cli.store.clone();
    let connect = move || SqliteStore::open(&store_path);

    let result: SimResult<RunSummary> = match cli.format {
        EventFormat::Csv => {
            let base = cli.events.clone();
            run_simulation(&config, shutdown, connect, trackers_from_records, move |worker| {
                CsvProducer::new(&worker_path(&base, worker))
            })
        }
        EventFormat::Jsonl => {
            let base = cli.events.clone();
            run_simulation(&config, shutdown, connect, trackers_from_records, move |worker| {
                JsonLinesProducer::new(&worker_path(&base, worker))
            })
        }
    };

    match result {
        Ok(summary) => {
            info!(
                trackers = summary.trackers,
                events_sent = summary.events_sent(),
                retired = summary.retired(),
                cancelled = summary.cancelled(),
                "run complete",
            );
            Ok(())
        }
        // The operator stopped the process before anything started; that's
        // a clean exit, not a failure.
        Err(SimError::ShutdownDuringBootstrap { while_doing }) => {
            info!(while_doing, "shutdown during bootstrap, no work started");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Per-worker sink path: `events.csv` becomes `events-3.csv` for worker 3.
fn worker_path(base: &Path, worker: usize) -> PathBuf {
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("events");
    let name = match base.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{stem}-{worker}.{ext}"),
        None => format!("{stem}-{worker}"),
    };
    base.with_file_name(name)
}
