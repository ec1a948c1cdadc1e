mod calc;
mod config;
mod input;
mod ipc;
mod sheet;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, warn};

use crate::config::SheetDefaults;

/// Marksheet sidecar: grades subject marks and builds the printable preview
/// for the UI process, one JSON request per stdin line.
#[derive(Debug, Parser)]
#[command(name = "marksheetd", version, long_about = None)]
struct Cli {
    /// JSON file overriding the school defaults and default subject list.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

fn main() {
    // stdout carries responses, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let defaults = match &cli.config {
        Some(path) => match SheetDefaults::load_from_file(path) {
            Ok(d) => d,
            Err(e) => {
                error!("failed to load defaults: {:#}", e);
                process::exit(1);
            }
        },
        None => SheetDefaults::default(),
    };

    let mut state = ipc::AppState::new(defaults);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        subjects = state.sheet.subject_count(),
        "marksheetd ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                warn!("stdin read failed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => ipc::handle_request(&mut state, req),
            Err(e) => {
                warn!("dropping malformed request: {}", e);
                ipc::bad_json(e.to_string())
            }
        };

        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    info!("stdin closed, exiting");
}
