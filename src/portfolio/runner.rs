use crate::data::{Bar, BarSource};
use crate::engine::{backtest, BacktestConfig, EngineError};
use crate::portfolio::aggregate::PortfolioReport;
use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, warn};

//one instrument's bars, keyed by provider symbol
pub type Universe = Vec<(String, Vec<Bar>)>;

//backtests every instrument in parallel, results keep the input order
pub fn run_portfolio(
    universe: &[(String, Vec<Bar>)],
    config: &BacktestConfig,
) -> Result<PortfolioReport, EngineError> {
    let results = universe
        .par_iter()
        .map(|(symbol, bars)| backtest(symbol, bars, config).map(|r| (symbol.clone(), r)))
        .collect::<Result<Vec<_>, EngineError>>()?;

    let report = PortfolioReport::aggregate(results);
    info!(
        instruments = report.instruments.len(),
        skipped = report.skipped.len(),
        trades = report.total_trades,
        "portfolio backtest complete"
    );

    Ok(report)
}

//pulls `bars` of history per symbol
//symbols the source has nothing for are dropped with a warning, source failures abort
pub fn load_universe<S: BarSource>(
    source: &S,
    symbols: &[String],
    bars: usize,
) -> Result<Universe> {
    let mut universe = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        let history = source
            .history(symbol, bars)
            .context(format!("Failed to fetch history for {}", symbol))?;

        match history {
            Some(series) if !series.is_empty() => universe.push((symbol.clone(), series)),
            _ => warn!(%symbol, "no data available, skipping"),
        }
    }

    Ok(universe)
}
