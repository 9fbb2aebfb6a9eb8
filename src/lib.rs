//a Rust-based trend/momentum screener with a no-look-ahead daily-bar backtester

pub mod config;
pub mod data;
pub mod engine;
pub mod indicators;
pub mod instrument;
pub mod metrics;
pub mod portfolio;
pub mod strategy;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{BacktestSettings, MarketHours, PolicyKind, ScreenerConfiguration};
    pub use crate::data::{filter_by_symbol, load_csv, Bar, BarError, BarSource, CsvBarSource};
    pub use crate::engine::{
        backtest, live_signal, BacktestConfig, BacktestEngine, BacktestResult, Direction,
        EngineError, LiveSignal, Outcome, Trade,
    };
    pub use crate::indicators::{rolling_context, rolling_means, RollingContext, RollingMean};
    pub use crate::instrument::Instrument;
    pub use crate::metrics::{BacktestSummary, EquityCurve};
    pub use crate::portfolio::{load_universe, run_portfolio, PortfolioReport, Universe};
    pub use crate::strategy::{
        ConfirmedTrendPolicy, ExitLevels, LiveMomentumPolicy, Signal, SignalPolicy,
    };
}
