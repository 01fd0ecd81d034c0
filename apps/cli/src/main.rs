//! # Order Gate CLI
//!
//! Validates one order payload against a customer directory and prints the
//! response JSON.
//!
//! ## Usage
//! ```bash
//! # Validate an order file against the built-in demo directory
//! cargo run -p gate-cli -- --order order.json
//!
//! # Read the payload from stdin
//! cat order.json | cargo run -p gate-cli -- --order -
//!
//! # Seed the directory from a JSON file instead of the fixtures
//! cargo run -p gate-cli -- --order order.json --customers customers.json
//!
//! # One-line output for piping
//! cargo run -p gate-cli -- --order order.json --compact
//! ```
//!
//! ## Exit Codes
//! - 0: order approved
//! - 1: order rejected (the response JSON says why)
//! - 2: host error (unreadable file, text that is not JSON, bad seed)
//!
//! Logging goes to stderr via `RUST_LOG` (e.g. `RUST_LOG=gate_core=debug`
//! to watch the state machine walk its stages); stdout carries only the
//! response JSON.

use std::env;
use std::error::Error;
use std::fs;
use std::io::Read;
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use gate_core::{OrderValidator, ValidationResponse};
use gate_directory::InMemoryDirectory;

/// Parsed command-line options.
struct Options {
    order_path: String,
    customers_path: Option<String>,
    compact: bool,
}

fn main() -> ExitCode {
    // Initialize tracing; default to info, overridable via RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = match parse_args() {
        Ok(Some(options)) => options,
        Ok(None) => return ExitCode::SUCCESS, // --help
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(approved) => {
            if approved {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

/// Wires the directory and validator, runs one validation, prints the
/// response. Returns whether the order was approved.
fn run(options: &Options) -> Result<bool, Box<dyn Error>> {
    let directory = match &options.customers_path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let directory = InMemoryDirectory::from_json(&text)?;
            info!(path = %path, customers = directory.len(), "seeded customer directory");
            directory
        }
        None => {
            let directory = InMemoryDirectory::with_fixtures();
            info!(customers = directory.len(), "using built-in demo directory");
            directory
        }
    };

    let payload_text = read_payload(&options.order_path)?;
    // Text that is not JSON at all is a host error; JSON of the wrong
    // shape is the core's business and comes back as a rejected result.
    let payload: serde_json::Value = serde_json::from_str(&payload_text)?;

    let validator = OrderValidator::new(directory);
    let result = validator.validate(&payload);
    let response = ValidationResponse::from_result(&result);

    let rendered = if options.compact {
        serde_json::to_string(&response)?
    } else {
        serde_json::to_string_pretty(&response)?
    };
    println!("{rendered}");

    Ok(result.is_approved())
}

/// Reads the payload from a file, or stdin when the path is `-`.
fn read_payload(path: &str) -> Result<String, Box<dyn Error>> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

/// Parses command-line arguments.
///
/// Returns `Ok(None)` when --help was requested.
fn parse_args() -> Result<Option<Options>, String> {
    let args: Vec<String> = env::args().collect();

    let mut order_path: Option<String> = None;
    let mut customers_path: Option<String> = None;
    let mut compact = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--order" | "-o" => {
                i += 1;
                order_path = Some(
                    args.get(i)
                        .ok_or_else(|| "--order requires a file path".to_string())?
                        .clone(),
                );
            }
            "--customers" | "-c" => {
                i += 1;
                customers_path = Some(
                    args.get(i)
                        .ok_or_else(|| "--customers requires a file path".to_string())?
                        .clone(),
                );
            }
            "--compact" => {
                compact = true;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            other => {
                return Err(format!("unknown argument: {other}"));
            }
        }
        i += 1;
    }

    let order_path = order_path.ok_or_else(|| "--order is required".to_string())?;

    Ok(Some(Options {
        order_path,
        customers_path,
        compact,
    }))
}

fn print_help() {
    println!("Order Gate - order validation CLI");
    println!();
    println!("Usage: gate-cli --order <FILE> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -o, --order <FILE>      Order payload JSON ('-' reads stdin)");
    println!("  -c, --customers <FILE>  Customer seed JSON (default: demo fixtures)");
    println!("      --compact           One-line JSON output");
    println!("  -h, --help              Show this help message");
    println!();
    println!("Exit codes: 0 approved, 1 rejected, 2 host error");
}
