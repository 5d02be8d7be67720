//! # Craft Planner
//!
//! Command-line tool that resolves a crafting route and prints the calldata
//! that would execute it.

use std::process::ExitCode;

use anvil::economy::{starter_config, BalanceVector, CatalogConfig, DeficitPolicy};
use anvil::{parse_balances, parse_item, plan, PlanError};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn print_usage() {
    println!("Usage: craft_planner <target> [quantity] [options]");
    println!();
    println!("  <target>               Item key (e.g. wooden_pickaxe) or token id");
    println!("  [quantity]             Units wanted, default 1");
    println!();
    println!("Options:");
    println!("  --catalog <path>       Recipe catalog TOML (default: built-in)");
    println!("  --balances <a,b,c>     Holdings aligned to the catalog item order");
    println!("  --full-recraft         Ignore partial stock of a short item");
}

fn option_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn run(args: &[String]) -> Result<(), PlanError> {
    let config = match option_value(args, "--catalog") {
        Some(path) => CatalogConfig::load(path)?,
        None => starter_config()?,
    };
    let (catalog, registry) = config.into_parts()?;

    let target = parse_item(&registry, &args[1])?;
    let quantity = match args.get(2).filter(|a| !a.starts_with("--")) {
        Some(text) => text
            .parse::<u64>()
            .map_err(|_| PlanError::InvalidQuantity(text.clone()))?,
        None => 1,
    };
    let balances = match option_value(args, "--balances") {
        Some(text) => parse_balances(&registry, text)?,
        None => BalanceVector::new(),
    };
    let policy = if args.iter().any(|a| a == "--full-recraft") {
        DeficitPolicy::FullRecraft
    } else {
        DeficitPolicy::NetPartialStock
    };

    println!("Items (balance order):");
    for item in registry.iter() {
        println!("  {:>3}  {:<20} {}", item.id.get(), item.key, balances.get(item.id));
    }
    println!();

    let report = plan(&catalog, &registry, &balances, target, quantity, policy)?;
    print!("{report}");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args[1].starts_with("--") {
        print_usage();
        return ExitCode::FAILURE;
    }

    info!(version = env!("CARGO_PKG_VERSION"), "craft planner starting");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
