pub mod confirmed_trend;
pub mod live_momentum;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use confirmed_trend::ConfirmedTrendPolicy;
pub use live_momentum::LiveMomentumPolicy;

//discrete trading decision for one bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Short,
    Wait,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Buy => "BUY",
            Signal::Short => "SHORT",
            Signal::Wait => "WAIT",
        };
        f.write_str(s)
    }
}

//price levels attached to an actionable live signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExitLevels {
    pub target: f64,
    pub stop_loss: f64,
}

//the two signal rules in use
//backtests run ConfirmedTrend, the live screen runs LiveMomentum. they disagree
//on purpose and are never merged: a live BUY is not what the backtest measured
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SignalPolicy {
    ConfirmedTrend(ConfirmedTrendPolicy),
    LiveMomentum(LiveMomentumPolicy),
}

impl Default for SignalPolicy {
    fn default() -> Self {
        SignalPolicy::ConfirmedTrend(ConfirmedTrendPolicy::default())
    }
}

impl SignalPolicy {
    //pure and total: same inputs give the same signal, absent averages never fail
    pub fn classify(
        &self,
        percent_change: f64,
        short_ma: Option<f64>,
        long_ma: Option<f64>,
    ) -> Signal {
        match self {
            SignalPolicy::ConfirmedTrend(policy) => {
                policy.classify(percent_change, short_ma, long_ma)
            }
            SignalPolicy::LiveMomentum(policy) => policy.classify(percent_change),
        }
    }

    //target/stop levels, only the live policy defines them
    pub fn exit_levels(&self, signal: Signal, close: f64) -> Option<ExitLevels> {
        match self {
            SignalPolicy::ConfirmedTrend(_) => None,
            SignalPolicy::LiveMomentum(policy) => policy.exit_levels(signal, close),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SignalPolicy::ConfirmedTrend(_) => "Trend + Momentum (MA confirmed)",
            SignalPolicy::LiveMomentum(_) => "Live Momentum (target/stop)",
        }
    }
}
