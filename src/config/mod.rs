pub mod screener_config;

pub use screener_config::{BacktestSettings, MarketHours, PolicyKind, ScreenerConfiguration};
