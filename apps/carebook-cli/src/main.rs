//! # Carebook Demo Entry Point
//!
//! ```bash
//! cargo run -p carebook-cli
//! cargo run -p carebook-cli -- --json --strict
//! CAREBOOK_TODAY=2024-03-15 cargo run -p carebook-cli
//! ```
//!
//! The actual work is in lib.rs for testability.

use std::env;
use std::process::ExitCode;

use carebook_cli::{init_tracing, run, Options};
use carebook_core::StoreConfig;
use tracing::error;

fn main() -> ExitCode {
    init_tracing();

    let options = match Options::parse(env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(&options, StoreConfig::from_env()) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Demo failed");
            ExitCode::FAILURE
        }
    }
}
