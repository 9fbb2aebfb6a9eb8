use chrono::{Duration, NaiveDate};
use screener::prelude::*;

fn series(symbol: &str, prices: &[(f64, f64)]) -> Vec<Bar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, &(open, close))| {
            Bar::new_unchecked(
                start + Duration::days(i as i64),
                open,
                open.max(close),
                open.min(close),
                close,
                symbol.to_string(),
            )
        })
        .collect()
}

//windows shrunk to 2/3 so a handful of bars is enough
fn compact_config() -> BacktestConfig {
    BacktestConfig {
        short_window: 2,
        long_window: 3,
        min_history: Some(5),
        ..BacktestConfig::default()
    }
}

#[test]
fn buy_followed_by_lower_close_is_a_loss() {
    //two warm-up bars, then +1.0% at 100 -> 101, then 101 -> 99, then 99 -> 100
    let bars = series(
        "RELIANCE.NS",
        &[(98.0, 98.0), (99.0, 99.0), (100.0, 101.0), (101.0, 99.0), (99.0, 100.0)],
    );

    let result = backtest("RELIANCE.NS", &bars, &compact_config())
        .unwrap()
        .expect("one trade expected");

    assert_eq!(result.trades.len(), 1);
    let trade = &result.trades[0];
    assert_eq!(trade.instrument, "RELIANCE");
    assert_eq!(trade.entry_date, bars[2].date);
    assert_eq!(trade.direction, Direction::Buy);
    assert_eq!(trade.entry_price, 101.0);
    assert_eq!(trade.exit_price, 99.0);
    assert_eq!(trade.outcome, Outcome::Loss);
    assert_eq!(result.equity_curve.points(), &[-1]);
    assert_eq!(result.equity_curve.with_origin(), vec![0, -1]);

    assert_eq!(result.summary.trade_count, 1);
    assert_eq!(result.summary.win_count, 0);
    assert_eq!(result.summary.loss_count, 1);
    assert_eq!(result.summary.win_rate, 0.0);
}

#[test]
fn zero_open_bar_never_enters() {
    //same setup, but the signal bar has a zero open
    for close in [50.0, 101.0, 150.0] {
        let mut bars = series(
            "TCS.NS",
            &[(98.0, 98.0), (99.0, 99.0), (100.0, 101.0), (101.0, 99.0), (99.0, 100.0)],
        );
        bars[2].open = 0.0;
        bars[2].close = close;

        let result = backtest("TCS.NS", &bars, &compact_config()).unwrap();
        let entered_at_zero_open = result
            .map(|r| r.trades.iter().any(|t| t.entry_date == bars[2].date))
            .unwrap_or(false);
        assert!(!entered_at_zero_open, "close {close}");
    }
}

#[test]
fn no_signals_means_no_summary() {
    //flat market, every bar waits
    let bars = series("INFY.NS", &[(100.0, 100.0); 40]);
    assert_eq!(backtest("INFY.NS", &bars, &BacktestConfig::default()), Ok(None));
}

#[test]
fn last_bar_is_never_an_entry() {
    //only the final bar moves enough to signal
    let mut prices = vec![(100.0, 100.1); 30];
    prices.push((100.0, 105.0));
    let bars = series("SBIN.NS", &prices);

    assert_eq!(backtest("SBIN.NS", &bars, &BacktestConfig::default()), Ok(None));
}

#[test]
fn aggregation_of_two_instruments() {
    let day = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let trade = |symbol: &str, offset: i64, exit: f64| {
        Trade::new(day + Duration::days(offset), symbol.to_string(), Direction::Buy, 100.0, exit)
    };

    let first = BacktestResult::from_trades(
        "ICICIBANK".to_string(),
        vec![trade("ICICIBANK", 0, 101.0), trade("ICICIBANK", 1, 99.0)],
    );
    let second = BacktestResult::from_trades(
        "KOTAKBANK".to_string(),
        vec![
            trade("KOTAKBANK", 0, 101.0),
            trade("KOTAKBANK", 1, 102.0),
            trade("KOTAKBANK", 2, 103.0),
        ],
    );

    let report = PortfolioReport::aggregate(vec![
        ("ICICIBANK.NS".to_string(), first),
        ("KOTAKBANK.NS".to_string(), second),
    ]);

    assert_eq!(report.total_trades, 5);
    assert_eq!(report.total_wins, 4);
    assert_eq!(report.total_losses, 1);
    assert!((report.win_rate.unwrap() - 80.0).abs() < 1e-6);
    assert_eq!(report.equity_curve.points(), &[1, 0, 1, 2, 3]);
}

#[test]
fn live_and_backtest_policies_are_selected_explicitly() {
    //a +0.4% bar in a downtrend
    let mut prices: Vec<(f64, f64)> = (0..25)
        .map(|i| (200.0 - i as f64, 200.0 - i as f64))
        .collect();
    prices.push((176.0, 176.7));
    let bars = series("LT.NS", &prices);

    let config = ScreenerConfiguration::default();
    let live = live_signal("LT.NS", &bars, &config.policy(PolicyKind::LiveMomentum), 5, 20)
        .unwrap()
        .unwrap();
    let confirmed = live_signal("LT.NS", &bars, &config.policy(PolicyKind::ConfirmedTrend), 5, 20)
        .unwrap()
        .unwrap();

    assert_eq!(live.signal, Signal::Buy);
    assert!(live.levels.is_some());
    assert_eq!(confirmed.signal, Signal::Wait);
}

#[test]
fn csv_source_feeds_the_portfolio_runner() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "date,symbol,open,high,low,close").unwrap();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    for i in 0..40 {
        let close = 100.0 + i as f64;
        writeln!(
            file,
            "{},AXISBANK.NS,{},{},{},{}",
            start + Duration::days(i),
            close - 1.0,
            close,
            close - 1.0,
            close
        )
        .unwrap();
    }

    let source = CsvBarSource::open(file.path()).unwrap();
    let settings = BacktestSettings::default();
    let universe = load_universe(
        &source,
        &["AXISBANK.NS".to_string(), "ITC.NS".to_string()],
        settings.history_bars(),
    )
    .unwrap();
    assert_eq!(universe.len(), 1);
    assert_eq!(universe[0].1.len(), 40);

    let report = run_portfolio(&universe, &BacktestConfig::default()).unwrap();
    assert_eq!(report.total_trades, 20);
    assert_eq!(report.total_wins, 20);
    assert_eq!(report.equity_curve.last(), 20);
}
