//! `postura-cli` – Postura command line interface.
//!
//! Runs a posture scenario over every image in a folder:
//!
//! 1. Resolves the configuration (`postura.toml`, `POSTURA_*` env vars, then
//!    command-line flags).
//! 2. Enumerates the images in `--folder`.
//! 3. Feeds each image through the [`Pipeline`] with the JSON sidecar
//!    detector and the console renderer.
//! 4. Prints a per-state summary.

mod args;
mod console;
mod data;
mod sidecar;

use clap::Parser;
use colored::Colorize;
use tracing::{error, info};

use postura_feedback::config;
use postura_feedback::{Pipeline, PosturaConfig, RunSummary, Scenario};
use postura_types::{FeedbackState, PostureError};

use crate::args::Args;
use crate::console::ConsoleRenderer;
use crate::sidecar::JsonSidecarDetector;

fn main() {
    // ── Structured logging ────────────────────────────────────────────────
    // RUST_LOG selects the filter (default "info"); POSTURA_LOG_FORMAT=json
    // switches to newline-delimited JSON.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if std::env::var("POSTURA_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .compact()
            .init();
    }

    let args = Args::parse();

    let cfg = match resolve_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            println!("{}: {}", "Config error".red(), e);
            std::process::exit(2);
        }
    };

    if args.write_config {
        match config::save_to(&cfg, &args.config) {
            Ok(()) => println!("  Wrote {}", args.config.display().to_string().bold()),
            Err(e) => {
                error!(error = %e, "could not write configuration");
                println!("{}: {}", "Config error".red(), e);
                std::process::exit(2);
            }
        }
        return;
    }

    let images = data::get_data(&args.folder, &args.extension);
    if images.is_empty() {
        println!("No images found. Review the directory.");
        return;
    }

    info!(
        scenario = %cfg.scenario,
        images = images.len(),
        folder = %args.folder.display(),
        "starting run"
    );
    println!(
        "  Scenario {} on {} image(s)\n",
        cfg.scenario.to_string().bold(),
        images.len()
    );

    let pipeline = Pipeline::new(&cfg);
    let mut detector = JsonSidecarDetector::new(args.detections.clone());
    let mut renderer = ConsoleRenderer::new();
    let summary = pipeline.run(&mut detector, &mut renderer, &images);

    print_summary(&summary);
    if summary.processed() == 0 {
        std::process::exit(1);
    }
}

/// Config file, then environment, then command-line flags.
fn resolve_config(args: &Args) -> Result<PosturaConfig, PostureError> {
    let mut cfg = config::resolve(&args.config)?;
    if let Some(scenario) = &args.scenario {
        cfg.scenario = Scenario::new(scenario.trim());
    }
    if let Some(show) = args.show {
        cfg.show = show;
    }
    Ok(cfg)
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!(
        "  {} processed, {} failed",
        summary.processed().to_string().green().bold(),
        summary.failed().to_string().red().bold()
    );
    for (state, count) in summary.state_counts() {
        let label = match state {
            FeedbackState::None => state.to_string().dimmed(),
            FeedbackState::Ok => state.to_string().green(),
            FeedbackState::Warning => state.to_string().yellow(),
            FeedbackState::InsufficientVisibility => state.to_string().red(),
        };
        println!("    {label}: {count}");
    }
    for outcome in summary.outcomes.iter().filter(|o| o.result.is_err()) {
        if let Err(e) = &outcome.result {
            println!("    {} {}: {}", "✗".red(), outcome.path.display(), e);
        }
    }
}
