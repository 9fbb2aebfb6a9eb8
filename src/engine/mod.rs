pub mod backtest;
pub mod error;
pub mod live;
pub mod trade;

pub use backtest::{backtest, BacktestConfig, BacktestEngine, BacktestResult, MIN_HISTORY_PADDING};
pub use error::{validate_order, EngineError};
pub use live::{live_signal, LiveSignal};
pub use trade::{Direction, Outcome, Trade};
