//! sumtrack - summoner spell cooldown tracker overlay
//!
//! Polls the game client's live telemetry endpoint, tracks opposing
//! summoner spell cooldowns, and presents them in a small always-on-top
//! overlay anchored to the game window.

#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod run;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::EnvFilter;

use sumtrack_core::telemetry::DEFAULT_ENDPOINT;

/// Title the game client window carries while a match is running.
const DEFAULT_WINDOW_TITLE: &str = "League of Legends (TM) Client";

#[derive(Parser, Debug)]
#[command(version, about = "Summoner spell cooldown tracker overlay")]
struct Args {
    /// Live telemetry endpoint to poll
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Exact title of the game window the overlay anchors to
    #[arg(long, default_value = DEFAULT_WINDOW_TITLE)]
    window_title: String,

    /// Telemetry poll cadence in seconds
    #[arg(long, default_value_t = 1)]
    poll_secs: u64,

    /// Spell definition override file (defaults to the config directory)
    #[arg(long)]
    spells: Option<PathBuf>,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_path: Option<PathBuf>,
}

/// Initialize logging, writing to --log-path if given, otherwise stderr.
///
/// The returned guard must stay alive for the file writer to flush.
fn init_logging(log_path: Option<&PathBuf>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Some(path) = log_path {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let file_name = path.file_name().unwrap_or_else(|| "sumtrack.log".as_ref());
        let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
            dir,
            file_name.to_os_string(),
        ));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
            .init();
        return Some(guard);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    None
}

fn main() {
    let args = Args::parse();
    let _log_guard = init_logging(args.log_path.as_ref());

    if let Err(e) = run::run(args) {
        tracing::error!("fatal: {e}");
        std::process::exit(1);
    }
}
