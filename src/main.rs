//! Seismon Service - Istanbul earthquake early-warning feed
//!
//! A server-side process that repeatedly:
//! 1. Ingests recent earthquakes from Kandilli Observatory, falling back to USGS
//! 2. Filters them against the configured magnitude, distance and time window
//! 3. Scores regional risk and flags strong recent events near Istanbul
//! 4. Estimates P/S wave arrival times at the city centre
//!
//! Usage:
//!   cargo run --release                          # Polling loop, summary on stdout
//!   cargo run --release -- --once                # One snapshot as JSON, then exit
//!   cargo run --release -- --endpoint 8080       # Serve JSON on port 8080
//!   cargo run --release -- --config other.toml   # Use another configuration file
//!
//! Environment:
//!   SEISMON_CONFIG - configuration file path (also read from .env)
//!   RUST_LOG       - log filter (default: info)

use seismon_service::config;
use seismon_service::endpoint;
use seismon_service::pipeline::Pipeline;
use std::env;
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

enum Mode {
    Loop,
    Once,
    Endpoint(u16),
}

fn usage(program: &str) -> String {
    format!("Usage: {} [--config PATH] [--once | --endpoint PORT]", program)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    init_tracing();

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut mode = Mode::Loop;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
            }
            "--endpoint" => match args.get(i + 1).and_then(|p| p.parse().ok()) {
                Some(port) => {
                    mode = Mode::Endpoint(port);
                    i += 2;
                }
                None => {
                    eprintln!("Error: --endpoint requires a port number");
                    std::process::exit(1);
                }
            },
            "--once" => {
                mode = Mode::Once;
                i += 1;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("{}", usage(&args[0]));
                std::process::exit(1);
            }
        }
    }

    let config = config::load_or_default(config_path.as_deref())?;
    let mut pipeline = Pipeline::from_config(config)?;

    match mode {
        Mode::Once => {
            let snapshot = pipeline.run_cycle();
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Mode::Endpoint(port) => {
            print_banner();
            println!("🚀 Starting HTTP endpoint server...");
            endpoint::start_endpoint_server(port, &mut pipeline)?;
        }
        Mode::Loop => {
            print_banner();
            pipeline.run();
        }
    }

    Ok(())
}

fn print_banner() {
    println!("🌍 Seismon Service");
    println!("==================\n");
}
