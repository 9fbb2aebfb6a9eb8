use crate::data::CsvBarSource;
use crate::engine::BacktestConfig;
use crate::strategy::{ConfirmedTrendPolicy, LiveMomentumPolicy, SignalPolicy};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

//signal policy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyKind {
    ConfirmedTrend,
    LiveMomentum,
}

impl PolicyKind {
    //parse policy kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "confirmed" | "confirmed_trend" | "trend" => Some(PolicyKind::ConfirmedTrend),
            "live" | "live_momentum" | "momentum" => Some(PolicyKind::LiveMomentum),
            _ => None,
        }
    }
}

//backtest windows and history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestSettings {
    pub short_window: usize,
    pub long_window: usize,
    //trading days evaluated after the warm-up
    pub backtest_days: usize,
    pub min_history: Option<usize>,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        BacktestSettings {
            short_window: 5,
            long_window: 20,
            backtest_days: 30,
            min_history: None,
        }
    }
}

impl BacktestSettings {
    //bars to request per instrument so early entries have averages
    pub fn history_bars(&self) -> usize {
        self.long_window + self.backtest_days
    }
}

//exchange session, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl Default for MarketHours {
    fn default() -> Self {
        MarketHours {
            open: NaiveTime::from_hms_opt(9, 15, 0).unwrap_or_default(),
            close: NaiveTime::from_hms_opt(15, 30, 0).unwrap_or_default(),
        }
    }
}

impl MarketHours {
    pub fn is_open(&self, now: NaiveTime) -> bool {
        self.open <= now && now <= self.close
    }
}

//complete screener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfiguration {
    //data
    pub data_path: PathBuf,
    pub symbols: Vec<String>,

    //backtest
    pub backtest: BacktestSettings,
    pub backtest_policy: PolicyKind,

    //live screen
    pub live_policy: PolicyKind,
    pub market_hours: MarketHours,

    //policy parameters
    pub confirmed_trend: ConfirmedTrendPolicy,
    pub live_momentum: LiveMomentumPolicy,
}

impl Default for ScreenerConfiguration {
    fn default() -> Self {
        ScreenerConfiguration {
            data_path: PathBuf::from("data.csv"),
            symbols: [
                "RELIANCE.NS",
                "TCS.NS",
                "HDFCBANK.NS",
                "INFY.NS",
                "ICICIBANK.NS",
                "LT.NS",
                "SBIN.NS",
                "AXISBANK.NS",
                "KOTAKBANK.NS",
                "ITC.NS",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            backtest: BacktestSettings::default(),
            backtest_policy: PolicyKind::ConfirmedTrend,
            live_policy: PolicyKind::LiveMomentum,
            market_hours: MarketHours::default(),
            confirmed_trend: ConfirmedTrendPolicy::default(),
            live_momentum: LiveMomentumPolicy::default(),
        }
    }
}

impl ScreenerConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ScreenerConfiguration = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    //resolves a kind to a policy carrying this configuration's parameters
    pub fn policy(&self, kind: PolicyKind) -> SignalPolicy {
        match kind {
            PolicyKind::ConfirmedTrend => SignalPolicy::ConfirmedTrend(self.confirmed_trend),
            PolicyKind::LiveMomentum => SignalPolicy::LiveMomentum(self.live_momentum),
        }
    }

    //true when live and backtested signals follow different rules
    pub fn policies_diverge(&self) -> bool {
        self.live_policy != self.backtest_policy
    }

    //configured symbols, or everything the file holds when none are configured
    pub fn universe_symbols(&self, source: &CsvBarSource) -> Vec<String> {
        if self.symbols.is_empty() {
            source.symbols()
        } else {
            self.symbols.clone()
        }
    }

    //engine configuration for the backtest policy
    pub fn backtest_config(&self) -> BacktestConfig {
        BacktestConfig {
            short_window: self.backtest.short_window,
            long_window: self.backtest.long_window,
            min_history: self.backtest.min_history,
            policy: self.policy(self.backtest_policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_policy_names() {
        assert_eq!(PolicyKind::parse("Live"), Some(PolicyKind::LiveMomentum));
        assert_eq!(PolicyKind::parse("confirmed_trend"), Some(PolicyKind::ConfirmedTrend));
        assert_eq!(PolicyKind::parse("rsi"), None);
    }

    #[test]
    fn defaults_match_the_screen() {
        let config = ScreenerConfiguration::default();
        assert_eq!(config.symbols.len(), 10);
        assert_eq!(config.backtest.history_bars(), 50);
        assert!(config.policies_diverge());

        let engine = config.backtest_config();
        assert_eq!(engine.min_history(), 25);
        assert_eq!(
            engine.policy,
            SignalPolicy::ConfirmedTrend(ConfirmedTrendPolicy { threshold: 0.60 })
        );
    }

    #[test]
    fn empty_symbol_list_falls_back_to_the_file() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let bar = |symbol: &str| {
            crate::data::Bar::new_unchecked(date, 10.0, 11.0, 9.0, 10.5, symbol.to_string())
        };
        let source = CsvBarSource::from_bars(vec![bar("ITC.NS"), bar("LT.NS")]);

        let mut config = ScreenerConfiguration::default();
        assert_eq!(config.universe_symbols(&source).len(), 10);

        config.symbols.clear();
        assert_eq!(config.universe_symbols(&source), vec!["ITC.NS", "LT.NS"]);
    }

    #[test]
    fn market_hours_are_inclusive() {
        let hours = MarketHours::default();
        assert!(hours.is_open(NaiveTime::from_hms_opt(9, 15, 0).unwrap()));
        assert!(hours.is_open(NaiveTime::from_hms_opt(15, 30, 0).unwrap()));
        assert!(!hours.is_open(NaiveTime::from_hms_opt(15, 31, 0).unwrap()));
        assert!(!hours.is_open(NaiveTime::from_hms_opt(8, 0, 0).unwrap()));
    }

    #[test]
    fn json_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screener.json");

        let mut config = ScreenerConfiguration::default();
        config.symbols = vec!["TCS.NS".to_string()];
        config.live_momentum.buy_threshold = 0.4;
        config.to_json_file(&path).unwrap();

        let loaded = ScreenerConfiguration::from_json_file(&path).unwrap();
        assert_eq!(loaded.symbols, vec!["TCS.NS".to_string()]);
        assert_eq!(loaded.live_momentum.buy_threshold, 0.4);
        assert_eq!(loaded.market_hours, MarketHours::default());
    }
}
