//! Synthetic market simulation demo driver.
//!
//! Stands in for the dashboard layer: owns the random source and one
//! session ledger, drives order flow through the core, and renders
//! stats. The core itself never touches I/O.

use std::time::Instant;

use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use synthbook::config::SimConfig;
use synthbook::metrics;
use synthbook::session::SessionLedger;
use synthbook::trading::{OrderRequest, Side};

/// Synthetic order book and latency simulation engine.
#[derive(Parser, Debug)]
#[command(name = "synthbook")]
#[command(about = "Synthetic order book generator and order flow simulator")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a simulated session and report stats (default).
    Run {
        /// Instrument symbol.
        #[arg(long, default_value = "BTCUSDT")]
        symbol: String,

        /// Reference price for book generation.
        #[arg(long, default_value = "50000")]
        reference_price: Decimal,

        /// Number of orders to submit.
        #[arg(long, default_value = "25")]
        orders: u32,

        /// Seed for the random source (omit for entropy).
        #[arg(long)]
        seed: Option<u64>,

        /// Print the final session snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Run a submission throughput benchmark.
    Bench {
        /// Number of orders to push through the simulator.
        #[arg(long, default_value = "100000")]
        orders: u64,

        /// Seed for the random source (omit for entropy).
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = SimConfig::load()?;
    config.validate().map_err(anyhow::Error::msg)?;

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    metrics::init_metrics();

    match args.command {
        Some(Command::CheckConfig) => check_config(&config),
        Some(Command::Bench { orders, seed }) => bench(&config, orders, seed),
        Some(Command::Run {
            symbol,
            reference_price,
            orders,
            seed,
            json,
        }) => run(&config, &symbol, reference_price, orders, seed, json),
        None => run(&config, "BTCUSDT", dec!(50000), 25, None, false),
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn check_config(config: &SimConfig) -> anyhow::Result<()> {
    println!("Configuration OK: {config:#?}");
    Ok(())
}

fn run(
    config: &SimConfig,
    symbol: &str,
    reference_price: Decimal,
    orders: u32,
    seed: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let mut rng = seeded_rng(seed);
    let mut ledger = SessionLedger::new(config);

    ledger.refresh_book(&mut rng, reference_price);
    let book = ledger.book();
    info!(
        best_bid = %book.best_bid().map(|p| p.to_string()).unwrap_or_default(),
        best_ask = %book.best_ask().map(|p| p.to_string()).unwrap_or_default(),
        spread = %book.spread()?,
        mid = %book.mid()?,
        "generated book for {symbol}"
    );

    for i in 0..orders {
        let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
        let quantity = Decimal::new(rng.gen_range(1..=100), 1); // 0.1 to 10.0
        let record = ledger.submit_order(&mut rng, OrderRequest::market(symbol, side, quantity))?;
        info!(
            side = %record.side,
            quantity = %record.quantity,
            latency_us = record.latency_micros() as u64,
            matches = record.match_count,
            "order processed"
        );
    }

    let stats = ledger.stats();
    info!(
        total_orders = ledger.total_orders(),
        total_matches = ledger.total_matches(),
        mean_us = stats.mean.as_micros() as u64,
        p50_us = stats.p50.as_micros() as u64,
        p95_us = stats.p95.as_micros() as u64,
        p99_us = stats.p99.as_micros() as u64,
        "session complete"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&ledger.snapshot())?);
    }

    Ok(())
}

fn bench(config: &SimConfig, orders: u64, seed: Option<u64>) -> anyhow::Result<()> {
    let bench_config = config.clone().long_window();
    let mut rng = seeded_rng(seed);
    let mut ledger = SessionLedger::new(&bench_config);
    ledger.refresh_book(&mut rng, dec!(50000));

    let start = Instant::now();
    for _ in 0..orders {
        ledger.submit_order(&mut rng, OrderRequest::market("BTCUSDT", Side::Buy, dec!(0.1)))?;
    }
    let elapsed = start.elapsed();

    let stats = ledger.stats();
    let throughput = orders as f64 / elapsed.as_secs_f64();
    println!(
        "{orders} orders in {:.2}ms\n\
         - Throughput: {throughput:.0} orders/sec\n\
         - Simulated latency: mean {:.1}us, p50 {}us, p95 {}us, p99 {}us\n\
         - Matches: {}",
        elapsed.as_secs_f64() * 1_000.0,
        stats.mean.as_secs_f64() * 1_000_000.0,
        stats.p50.as_micros(),
        stats.p95.as_micros(),
        stats.p99.as_micros(),
        ledger.total_matches(),
    );

    Ok(())
}
