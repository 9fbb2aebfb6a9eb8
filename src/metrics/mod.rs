pub mod summary;
pub mod timeseries;

pub use summary::{win_rate, BacktestSummary};
pub use timeseries::{max_drawdown, EquityCurve};
