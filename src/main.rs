//! Split Ledger CLI
//!
//! Command-line interface for settling shared expenses from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- participants.csv expenses.csv > transfers.csv
//! cargo run -- --report balances participants.csv expenses.csv > balances.csv
//! cargo run -- --strategy async --settled settled.csv --split trip participants.csv expenses.csv
//! RUST_LOG=info cargo run -- participants.csv expenses.csv
//! ```
//!
//! The report goes to stdout. Diagnostics (skipped rows, load summaries) go to
//! stderr through `tracing`, filtered by `RUST_LOG` (default `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, file not readable, unknown participant under `reject`, etc.)

use split_ledger::cli;
use split_ledger::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();
    let request = args.to_request();
    let strategy = strategy::create_strategy(args.strategy);

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&request, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
