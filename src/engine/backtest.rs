use crate::data::Bar;
use crate::engine::error::{validate_order, EngineError};
use crate::engine::trade::{Direction, Trade};
use crate::indicators::{rolling_context, RollingContext};
use crate::instrument::Instrument;
use crate::metrics::{BacktestSummary, EquityCurve};
use crate::strategy::{Signal, SignalPolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

//extra bars beyond the long window needed before a backtest is attempted
pub const MIN_HISTORY_PADDING: usize = 5;

//result of a backtest on one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub instrument: String,
    pub summary: BacktestSummary,
    pub equity_curve: EquityCurve,
    pub trades: Vec<Trade>,
}

impl BacktestResult {
    //None when no trades were taken
    pub fn from_trades(instrument: String, trades: Vec<Trade>) -> Option<Self> {
        let summary = BacktestSummary::from_trades(&trades)?;
        let equity_curve = EquityCurve::from_trades(&trades);

        Some(BacktestResult {
            instrument,
            summary,
            equity_curve,
            trades,
        })
    }
}

//configuration for a backtest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub short_window: usize,
    pub long_window: usize,
    //defaults to long_window + MIN_HISTORY_PADDING
    pub min_history: Option<usize>,
    pub policy: SignalPolicy,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            short_window: 5,
            long_window: 20,
            min_history: None,
            policy: SignalPolicy::default(),
        }
    }
}

impl BacktestConfig {
    pub fn min_history(&self) -> usize {
        self.min_history
            .unwrap_or(self.long_window + MIN_HISTORY_PADDING)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.short_window == 0 {
            return Err(EngineError::ZeroWindow {
                name: "short_window",
            });
        }
        if self.long_window == 0 {
            return Err(EngineError::ZeroWindow {
                name: "long_window",
            });
        }
        Ok(())
    }
}

//walks one instrument's bars forward, entering at close[i] and judging at close[i + 1]
pub struct BacktestEngine<'a> {
    config: BacktestConfig,
    bars: &'a [Bar],
    instrument: Instrument,
}

impl<'a> BacktestEngine<'a> {
    //creates a new backtest engine
    pub fn new(config: BacktestConfig, bars: &'a [Bar], instrument: Instrument) -> Self {
        BacktestEngine {
            config,
            bars,
            instrument,
        }
    }

    //Ok(None) for short history or zero trades
    //Err only when the bars or windows break the calling contract
    pub fn run(&self) -> Result<Option<BacktestResult>, EngineError> {
        self.config.validate()?;
        validate_order(self.bars.iter().map(|b| b.date))?;

        let min_history = self.config.min_history();
        if self.bars.len() < min_history {
            debug!(
                instrument = %self.instrument,
                bars = self.bars.len(),
                min_history,
                "not enough history, skipping backtest"
            );
            return Ok(None);
        }

        let context =
            rolling_context(self.bars, self.config.short_window, self.config.long_window)?;

        //the last bar has no next close to judge against
        let mut trades = Vec::new();
        for i in 0..self.bars.len().saturating_sub(1) {
            if let Some(trade) = self.evaluate(i, &context[i]) {
                trades.push(trade);
            }
        }

        let result =
            BacktestResult::from_trades(self.instrument.display_name().to_string(), trades);

        match &result {
            Some(r) => debug!(
                instrument = %self.instrument,
                trades = r.summary.trade_count,
                wins = r.summary.win_count,
                win_rate = r.summary.win_rate,
                "backtest finished"
            ),
            None => debug!(instrument = %self.instrument, "backtest produced no trades"),
        }

        Ok(result)
    }

    //reads only bars[i] and bars[i + 1]
    fn evaluate(&self, i: usize, context: &RollingContext) -> Option<Trade> {
        let bar = &self.bars[i];
        let next = &self.bars[i + 1];

        let percent_change = match context.percent_change {
            Some(p) => p,
            None => {
                trace!(
                    instrument = %self.instrument,
                    date = %bar.date,
                    "no usable move, skipping bar"
                );
                return None;
            }
        };

        if !next.close.is_finite() {
            trace!(instrument = %self.instrument, date = %next.date, "next close missing");
            return None;
        }

        if context.short_ma.is_none() || context.long_ma.is_none() {
            trace!(instrument = %self.instrument, date = %bar.date, "moving averages not ready");
            return None;
        }

        let direction = match self
            .config
            .policy
            .classify(percent_change, context.short_ma, context.long_ma)
        {
            Signal::Buy => Direction::Buy,
            Signal::Short => Direction::Short,
            Signal::Wait => return None,
        };

        Some(Trade::new(
            bar.date,
            self.instrument.display_name().to_string(),
            direction,
            bar.close,
            next.close,
        ))
    }
}

//runs a backtest over one instrument's ordered bars
pub fn backtest(
    symbol: &str,
    bars: &[Bar],
    config: &BacktestConfig,
) -> Result<Option<BacktestResult>, EngineError> {
    BacktestEngine::new(*config, bars, Instrument::new(symbol)).run()
}
