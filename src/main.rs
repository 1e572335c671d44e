// ABOUTME: Main entry point for the WAVED command-line client
//
// Binary: waved
// Usage: waved [--format text|json] <COMMAND>
// - register: interactive member registration
// - challenge / recruiting: browse challenge groups
// - reviews / my-reviews / delete-review: read and manage reviews
// - cancel: cancel participation
// - verify: submit verification proof
// - session: store auth tokens

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;

use waved::cli::{self, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();

    let result = match args.command {
        Commands::Register => cli::register::execute(args.format).await,
        Commands::Challenge(challenge_args) => cli::challenge::execute(challenge_args, args.format).await,
        Commands::Recruiting => cli::challenge::recruiting(args.format).await,
        Commands::Reviews(reviews_args) => cli::review::execute(reviews_args, args.format).await,
        Commands::MyReviews => cli::review::my_reviews(args.format).await,
        Commands::DeleteReview(delete_args) => cli::review::delete(delete_args).await,
        Commands::Cancel(cancel_args) => cli::challenge::cancel(cancel_args, args.format).await,
        Commands::Verify(verify_args) => cli::verify::execute(verify_args, args.format).await,
        Commands::Session(command) => cli::session::execute(command, args.format),
    };

    if let Err(e) = &result {
        tracing::error!("Command failed: {:#}", e);
    }

    result
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    let log_dir = std::env::var("HOME")
        .map(|home| PathBuf::from(home).join(".waved").join("logs"))
        .unwrap_or_else(|_| PathBuf::from(".waved/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    // One JSONL file per invocation
    let log_file = log_dir.join(format!(
        "waved-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waved=info".into());

    match OpenOptions::new().create(true).append(true).open(&log_file) {
        Ok(file) => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(file)
                    .with_ansi(false),
            )
            .with(filter)
            .init(),
        // Fall back to stderr when the log directory is not writable
        Err(_) => tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs in ~/.waved/logs for more details.");
    }));
}
