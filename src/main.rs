use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bsm_lib::{
    format_valuation, implied_volatility, price_csv_file, valuation, write_records, OptionKind,
    OptionParameters, PricerConfig,
};

/// Black-Scholes pricer (call/put) with Greeks.
#[derive(Debug, Parser)]
#[command(name = "bsm", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price one option and print its Greeks
    Price(PriceArgs),
    /// Solve for the volatility that reproduces a market price
    ImpliedVol(ImpliedVolArgs),
    /// Price every row of a CSV file
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
struct PriceArgs {
    /// Spot price
    #[arg(long, visible_alias = "S", allow_negative_numbers = true)]
    spot: Option<f64>,
    /// Strike price
    #[arg(long, visible_alias = "K", allow_negative_numbers = true)]
    strike: Option<f64>,
    /// Risk-free annual rate
    #[arg(long, visible_alias = "r", allow_negative_numbers = true)]
    rate: Option<f64>,
    /// Annual volatility
    #[arg(long, allow_negative_numbers = true)]
    sigma: Option<f64>,
    /// Maturity in years
    #[arg(long, visible_alias = "T", allow_negative_numbers = true)]
    maturity: Option<f64>,
    /// call or put
    #[arg(long)]
    kind: Option<OptionKind>,
    /// Use the example parameter set (S=100, K=105, r=0.05, sigma=0.2, T=1 by default)
    #[arg(long)]
    example: bool,
}

#[derive(Debug, Args)]
struct ImpliedVolArgs {
    #[arg(long, allow_negative_numbers = true)]
    spot: f64,
    #[arg(long, allow_negative_numbers = true)]
    strike: f64,
    #[arg(long, allow_negative_numbers = true)]
    rate: f64,
    #[arg(long, allow_negative_numbers = true)]
    maturity: f64,
    /// Observed option price
    #[arg(long, allow_negative_numbers = true)]
    price: f64,
    #[arg(long)]
    kind: Option<OptionKind>,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// CSV with columns spot,strike,rate,volatility,maturity,kind
    #[arg(long)]
    input: PathBuf,
    /// Output CSV; stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PricerConfig::load(path)?,
        None => PricerConfig::default(),
    };
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Price(args) => run_price(&args, &config),
        Command::ImpliedVol(args) => run_implied_vol(&args, &config),
        Command::Batch(args) => run_batch(&args),
    }
}

fn run_price(args: &PriceArgs, config: &PricerConfig) -> Result<()> {
    let kind = args.kind.unwrap_or(config.kind);
    let supplied = [args.spot, args.strike, args.rate, args.sigma, args.maturity];

    let params = match supplied {
        [Some(spot), Some(strike), Some(rate), Some(sigma), Some(maturity)] if !args.example => {
            OptionParameters::new(spot, strike, rate, sigma, maturity)
                .context("cannot build option parameters")?
        }
        _ => {
            let ex = &config.example;
            println!(
                ">> Using example parameters S={}, K={}, r={}, sigma={}, T={}",
                ex.spot, ex.strike, ex.rate, ex.volatility, ex.maturity
            );
            ex.to_params().context("example parameters in config are invalid")?
        }
    };

    let v = valuation(&params, kind)?;
    println!("{}", format_valuation(&v, config.precision));
    Ok(())
}

fn run_implied_vol(args: &ImpliedVolArgs, config: &PricerConfig) -> Result<()> {
    let kind = args.kind.unwrap_or(config.kind);
    let sigma = implied_volatility(
        args.spot,
        args.strike,
        args.rate,
        args.maturity,
        kind,
        args.price,
        &config.implied_vol,
    )?;
    println!("{sigma:.*}", config.precision);
    Ok(())
}

fn run_batch(args: &BatchArgs) -> Result<()> {
    let outcome = price_csv_file(&args.input)?;
    info!(
        priced = outcome.records.len(),
        rejected = outcome.rejections.len(),
        "batch complete"
    );

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_records(&outcome.records, file)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_records(&outcome.records, &mut handle)?;
            handle.flush()?;
        }
    }

    for rejection in &outcome.rejections {
        eprintln!("line {}: {}", rejection.line, rejection.reason);
    }
    outcome.ensure_complete()
}
