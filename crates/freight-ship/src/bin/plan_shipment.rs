//! # Shipment Planner
//!
//! Splits an order into parcels and prints the plan as JSON.
//!
//! ## Usage
//! ```bash
//! # Plan with the default carrier
//! cargo run -p freight-ship --bin plan-shipment -- order.json
//!
//! # Pick a carrier and a config file
//! cargo run -p freight-ship --bin plan-shipment -- order.json --carrier gls --config ./freight.toml
//!
//! # More logging
//! RUST_LOG=freight_core=debug cargo run -p freight-ship --bin plan-shipment -- order.json
//! ```
//!
//! Exit code 0 on success, 1 on any error, 2 on bad arguments.

use std::path::PathBuf;
use std::process::ExitCode;
use std::{env, fs};

use freight_ship::{plan_shipment, FreightConfig, Order, ShipError, ShipResult, ShipmentPlan};
use tracing_subscriber::EnvFilter;

struct Args {
    order_path: PathBuf,
    carrier: Option<String>,
    config_path: Option<PathBuf>,
}

fn print_usage() {
    println!("Freight Shipment Planner");
    println!();
    println!("Usage: plan-shipment <ORDER.json> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --carrier <CODE>   Carrier to plan for (default: configured default)");
    println!("      --config <PATH>    Config file (default: platform config dir)");
    println!("  -h, --help             Show this help message");
}

/// `Ok(None)` means help was requested.
fn parse_args(args: &[String]) -> Result<Option<Args>, String> {
    let mut order_path = None;
    let mut carrier = None;
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--carrier" => {
                i += 1;
                let code = args.get(i).ok_or("--carrier needs a value")?;
                carrier = Some(code.clone());
            }
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config needs a value")?;
                config_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => return Ok(None),
            flag if flag.starts_with('-') => return Err(format!("unknown option {flag}")),
            path => {
                if order_path.is_some() {
                    return Err(format!("unexpected argument {path}"));
                }
                order_path = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    let order_path = order_path.ok_or("missing order file")?;
    Ok(Some(Args {
        order_path,
        carrier,
        config_path,
    }))
}

fn run(args: Args) -> ShipResult<()> {
    let config = FreightConfig::load(args.config_path)?;
    let carrier = match args.carrier.as_deref() {
        Some(code) => config.carrier(code)?,
        None => config.default_carrier()?,
    };

    let json = fs::read_to_string(&args.order_path).map_err(|e| {
        ShipError::InvalidOrder(format!("{}: {}", args.order_path.display(), e))
    })?;
    let order = Order::from_json(&json)?;

    let plan = plan_shipment(&order, carrier)?;
    println!("{}", render_plan(&plan)?);
    Ok(())
}

fn render_plan(plan: &ShipmentPlan) -> ShipResult<String> {
    serde_json::to_string_pretty(plan).map_err(|e| ShipError::OutputFailed(e.to_string()))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            print_usage();
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
