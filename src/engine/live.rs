use crate::data::Bar;
use crate::engine::error::{validate_order, EngineError};
use crate::indicators::rolling_context;
use crate::instrument::Instrument;
use crate::strategy::{ExitLevels, Signal, SignalPolicy};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

//signal for the most recent bar of an instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSignal {
    pub instrument: String,
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    pub change_pct: f64,
    pub signal: Signal,
    pub levels: Option<ExitLevels>,
}

//classifies the latest bar using the whole supplied history for the averages
//None when there are no bars or the latest open is zero
pub fn live_signal(
    symbol: &str,
    bars: &[Bar],
    policy: &SignalPolicy,
    short_window: usize,
    long_window: usize,
) -> Result<Option<LiveSignal>, EngineError> {
    validate_order(bars.iter().map(|b| b.date))?;
    let context = rolling_context(bars, short_window, long_window)?;

    let (bar, ctx) = match bars.last().zip(context.last()) {
        Some(pair) => pair,
        None => return Ok(None),
    };

    let change_pct = match ctx.percent_change {
        Some(p) => p,
        None => return Ok(None),
    };

    let signal = policy.classify(change_pct, ctx.short_ma, ctx.long_ma);

    Ok(Some(LiveSignal {
        instrument: Instrument::new(symbol).display_name().to_string(),
        date: bar.date,
        open: bar.open,
        close: bar.close,
        change_pct,
        signal,
        levels: policy.exit_levels(signal, bar.close),
    }))
}
