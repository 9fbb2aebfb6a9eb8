use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prettytable::{Cell, Row, Table};
use screener::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "screener")]
#[command(
    about = "Trend/momentum stock screener with a no-look-ahead backtester",
    long_about = None
)]
struct Cli {
    //path to a json configuration (defaults are used when absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    //log level filter, RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //backtest the signal rule over historical bars
    Backtest {
        //path to csv data file (overrides the configuration)
        #[arg(long)]
        data: Option<PathBuf>,

        //symbols to test (eg RELIANCE.NS)
        //defaults to the configured list, or every symbol in the file
        #[arg(long, num_args = 1..)]
        symbols: Vec<String>,

        //signal policy (confirmed, live)
        #[arg(long)]
        policy: Option<String>,

        //trading days to evaluate after the warm-up
        #[arg(long)]
        days: Option<usize>,

        //print every simulated trade
        #[arg(long)]
        show_trades: bool,

        //output path for trades csv
        #[arg(long)]
        output_trades_csv: Option<PathBuf>,

        //output path for combined equity curve csv
        #[arg(long)]
        output_equity_csv: Option<PathBuf>,
    },
    //classify the latest bar of every symbol
    Live {
        //path to csv data file (overrides the configuration)
        #[arg(long)]
        data: Option<PathBuf>,

        //symbols to screen
        //defaults to the configured list, or every symbol in the file
        #[arg(long, num_args = 1..)]
        symbols: Vec<String>,

        //signal policy (confirmed, live)
        #[arg(long)]
        policy: Option<String>,
    },
    //write the default configuration as json
    InitConfig {
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let mut config = match &cli.config {
        Some(path) => ScreenerConfiguration::from_json_file(path)
            .context(format!("Failed to load configuration from {:?}", path))?,
        None => ScreenerConfiguration::default(),
    };

    match cli.command {
        Commands::Backtest {
            data,
            symbols,
            policy,
            days,
            show_trades,
            output_trades_csv,
            output_equity_csv,
        } => {
            apply_overrides(&mut config, data, symbols);
            if let Some(kind) = parse_policy(policy.as_deref())? {
                config.backtest_policy = kind;
            }
            if let Some(days) = days {
                config.backtest.backtest_days = days;
            }
            run_backtest(
                &config,
                show_trades,
                output_trades_csv.as_deref(),
                output_equity_csv.as_deref(),
            )?;
        }
        Commands::Live {
            data,
            symbols,
            policy,
        } => {
            apply_overrides(&mut config, data, symbols);
            if let Some(kind) = parse_policy(policy.as_deref())? {
                config.live_policy = kind;
            }
            run_live(&config)?;
        }
        Commands::InitConfig { path } => {
            ScreenerConfiguration::default().to_json_file(&path)?;
            println!("Default configuration written to {:?}", path);
        }
    }

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}

fn apply_overrides(
    config: &mut ScreenerConfiguration,
    data: Option<PathBuf>,
    symbols: Vec<String>,
) {
    if let Some(data) = data {
        config.data_path = data;
    }
    if !symbols.is_empty() {
        config.symbols = symbols;
    }
}

//opens the data file and settles which symbols to run
fn open_source(config: &ScreenerConfiguration) -> Result<(CsvBarSource, Vec<String>)> {
    let source = CsvBarSource::open(&config.data_path)
        .context(format!("Failed to load data from {:?}", config.data_path))?;

    let symbols = config.universe_symbols(&source);
    if symbols.is_empty() {
        anyhow::bail!("No symbols configured and none found in {:?}", config.data_path);
    }
    Ok((source, symbols))
}

fn parse_policy(name: Option<&str>) -> Result<Option<PolicyKind>> {
    name.map(|n| PolicyKind::parse(n).ok_or_else(|| anyhow::anyhow!("Unknown policy: {}", n)))
        .transpose()
}

fn run_backtest(
    config: &ScreenerConfiguration,
    show_trades: bool,
    output_trades_csv: Option<&Path>,
    output_equity_csv: Option<&Path>,
) -> Result<()> {
    let engine_config = config.backtest_config();
    let (source, symbols) = open_source(config)?;

    info!(
        policy = engine_config.policy.name(),
        days = config.backtest.backtest_days,
        symbols = symbols.len(),
        "running backtest"
    );

    let universe = load_universe(&source, &symbols, config.backtest.history_bars())?;
    let report = run_portfolio(&universe, &engine_config)?;

    println!(
        "Strategy Backtest ({}, last {} trading days)",
        engine_config.policy.name(),
        config.backtest.backtest_days
    );
    println!("==================================\n");

    if report.is_empty() {
        println!("No trades were generated for any instrument.");
        return Ok(());
    }

    report.pretty_print_table();

    for symbol in &report.skipped {
        println!(
            "{}: no result (short history or no signals)",
            Instrument::new(symbol.as_str())
        );
    }

    println!(
        "\nNet wins: {} over {} trades",
        report.equity_curve.last(),
        report.total_trades
    );

    if show_trades {
        println!();
        report.pretty_print_trades();
    }

    if let Some(path) = output_trades_csv {
        save_trades_csv(&report.trades, path)?;
        println!("\nTrades saved to {:?}", path);
    }

    if let Some(path) = output_equity_csv {
        save_equity_csv(&report.equity_curve, path)?;
        println!("Equity curve saved to {:?}", path);
    }

    Ok(())
}

fn run_live(config: &ScreenerConfiguration) -> Result<()> {
    let policy = config.policy(config.live_policy);
    let (source, symbols) = open_source(config)?;

    if !config.market_hours.is_open(chrono::Local::now().time()) {
        warn!("market is closed, signals reflect the last available session");
    }

    if config.policies_diverge() {
        warn!(
            live = policy.name(),
            backtest = config.policy(config.backtest_policy).name(),
            "live signals use a different rule than the backtest, \
             backtested win rates do not describe them"
        );
    }

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Stock"),
        Cell::new("Date"),
        Cell::new("Close"),
        Cell::new("Change %"),
        Cell::new("Signal"),
        Cell::new("Target"),
        Cell::new("Stop Loss"),
    ]));

    let mut rows = 0;
    for symbol in &symbols {
        let bars = match source.history(symbol, config.backtest.history_bars())? {
            Some(bars) => bars,
            None => {
                warn!(%symbol, "no data available, skipping");
                continue;
            }
        };

        let signal = match live_signal(
            symbol,
            &bars,
            &policy,
            config.backtest.short_window,
            config.backtest.long_window,
        )? {
            Some(signal) => signal,
            None => continue,
        };

        let (target, stop) = match signal.levels {
            Some(levels) => (
                format!("{:.2}", levels.target),
                format!("{:.2}", levels.stop_loss),
            ),
            None => ("-".to_string(), "-".to_string()),
        };

        table.add_row(Row::new(vec![
            Cell::new(&signal.instrument),
            Cell::new(&signal.date.to_string()),
            Cell::new(&format!("{:.2}", signal.close)),
            Cell::new(&format!("{:.2}", signal.change_pct)),
            Cell::new(&signal.signal.to_string()),
            Cell::new(&target),
            Cell::new(&stop),
        ]));
        rows += 1;
    }

    println!("Live Trade Signals ({})", policy.name());
    println!("==================================\n");

    if rows == 0 {
        println!("Live data unavailable for every symbol.");
    } else {
        table.printstd();
    }

    Ok(())
}

fn save_trades_csv(trades: &[Trade], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    for trade in trades {
        writer.serialize(trade)?;
    }

    writer.flush()?;
    Ok(())
}

fn save_equity_csv(curve: &EquityCurve, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["trade", "net_wins"])?;

    for (index, net_wins) in curve.with_origin().iter().enumerate() {
        writer.write_record([index.to_string(), net_wins.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}
