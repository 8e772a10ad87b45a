use morpho_curator_risk::{
    config::resolve_config,
    error::CuratorError,
    models::parse_markets_json,
    services::MarketRatingService,
    utils::logging::{init_logging, LoggingSettings},
};
use std::{env, fs, path::PathBuf, process};
use tracing::{error, info};

const USAGE: &str = "usage: curator-risk <markets.json> [--benchmark <rate>]";

struct Args {
    markets_path: PathBuf,
    benchmark: Option<f64>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, CuratorError> {
    let mut markets_path = None;
    let mut benchmark = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--benchmark" => {
                let raw = args.next().ok_or_else(|| CuratorError::from(USAGE))?;
                let rate = raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|r| r.is_finite())
                    .ok_or_else(|| CuratorError::from(format!("invalid benchmark rate: {}", raw)))?;
                benchmark = Some(rate);
            }
            path if markets_path.is_none() => markets_path = Some(PathBuf::from(path)),
            _ => return Err(CuratorError::from(USAGE)),
        }
    }

    Ok(Args {
        markets_path: markets_path.ok_or_else(|| CuratorError::from(USAGE))?,
        benchmark,
    })
}

fn run() -> Result<(), CuratorError> {
    let args = parse_args(env::args().skip(1))?;

    let config_file = env::var("CURATOR_CONFIG_FILE").ok().map(PathBuf::from);
    let config = resolve_config(config_file.as_deref())?;
    info!(version = %config.version, "Curator configuration resolved");

    let markets = parse_markets_json(&fs::read_to_string(&args.markets_path)?)?;
    info!(count = markets.len(), path = %args.markets_path.display(), "Loaded markets");

    let report = MarketRatingService::new(config).rate_markets(&markets, args.benchmark);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();
    if let Err(e) = init_logging(&LoggingSettings::from_env()) {
        eprintln!("curator-risk: {}", e);
        process::exit(1);
    }

    // The error is logged once here; returning it would print it again on stderr
    if let Err(e) = run() {
        error!("curator-risk failed: {}", e);
        process::exit(1);
    }
}
