use crate::engine::{BacktestResult, Trade};
use crate::metrics::{win_rate, EquityCurve};
use indexmap::IndexMap;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

//combined view over every instrument's backtest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    //instruments that produced trades, in input order
    pub instruments: IndexMap<String, BacktestResult>,
    //instruments with no result (short history or zero trades)
    pub skipped: Vec<String>,
    pub total_trades: usize,
    pub total_wins: usize,
    pub total_losses: usize,
    //None when no instrument traded
    pub win_rate: Option<f64>,
    //per-instrument curves laid end to end, not aligned by date
    pub equity_curve: EquityCurve,
    pub trades: Vec<Trade>,
}

impl PortfolioReport {
    pub fn aggregate<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<BacktestResult>)>,
    {
        let mut report = PortfolioReport::default();

        for (symbol, result) in results {
            let result = match result {
                Some(r) => r,
                None => {
                    report.skipped.push(symbol);
                    continue;
                }
            };

            report.total_trades += result.summary.trade_count;
            report.total_wins += result.summary.win_count;
            report.total_losses += result.summary.loss_count;

            for delta in result.equity_curve.increments() {
                report.equity_curve.push(delta);
            }
            report.trades.extend(result.trades.iter().cloned());

            report.instruments.insert(symbol, result);
        }

        report.win_rate = win_rate(report.total_wins, report.total_trades);
        report
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    //per instrument rows followed by a total row
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![
            Cell::new("Stock"),
            Cell::new("Trades"),
            Cell::new("Wins"),
            Cell::new("Losses"),
            Cell::new("Win %"),
        ]));

        for result in self.instruments.values() {
            let summary = &result.summary;
            table.add_row(Row::new(vec![
                Cell::new(&result.instrument),
                Cell::new(&summary.trade_count.to_string()),
                Cell::new(&summary.win_count.to_string()),
                Cell::new(&summary.loss_count.to_string()),
                Cell::new(&format!("{:.2}", summary.win_rate)),
            ]));
        }

        table.add_row(Row::new(vec![
            Cell::new("TOTAL").style_spec("b"),
            Cell::new(&self.total_trades.to_string()),
            Cell::new(&self.total_wins.to_string()),
            Cell::new(&self.total_losses.to_string()),
            Cell::new(
                &self
                    .win_rate
                    .map(|r| format!("{:.2}", r))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]));

        table.printstd();
    }

    //trade log in chronological order within each instrument
    pub fn pretty_print_trades(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![
            Cell::new("Date"),
            Cell::new("Stock"),
            Cell::new("Signal"),
            Cell::new("Entry Price"),
            Cell::new("Exit Price"),
            Cell::new("Result"),
        ]));

        for trade in &self.trades {
            table.add_row(Row::new(vec![
                Cell::new(&trade.entry_date.to_string()),
                Cell::new(&trade.instrument),
                Cell::new(&trade.direction.to_string()),
                Cell::new(&format!("{:.2}", trade.entry_price)),
                Cell::new(&format!("{:.2}", trade.exit_price)),
                Cell::new(&trade.outcome.to_string()),
            ]));
        }

        table.printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Direction;
    use chrono::NaiveDate;

    //wins first, then losses
    fn result(symbol: &str, wins: usize, losses: usize) -> BacktestResult {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let trades = (0..wins + losses)
            .map(|i| {
                let exit = if i < wins { 101.0 } else { 99.0 };
                Trade::new(
                    start + chrono::Duration::days(i as i64),
                    symbol.to_string(),
                    Direction::Buy,
                    100.0,
                    exit,
                )
            })
            .collect();
        BacktestResult::from_trades(symbol.to_string(), trades).unwrap()
    }

    #[test]
    fn totals_and_overall_rate() {
        let report = PortfolioReport::aggregate(vec![
            ("AXISBANK".to_string(), Some(result("AXISBANK", 1, 1))),
            ("LT".to_string(), Some(result("LT", 3, 0))),
        ]);

        assert_eq!(report.total_trades, 5);
        assert_eq!(report.total_wins, 4);
        assert_eq!(report.total_losses, 1);
        assert!((report.win_rate.unwrap() - 80.0).abs() < 1e-9);
        assert_eq!(report.trades.len(), 5);
    }

    #[test]
    fn equity_is_concatenated_then_accumulated() {
        let report = PortfolioReport::aggregate(vec![
            ("A".to_string(), Some(result("A", 1, 1))),
            ("B".to_string(), None),
            ("C".to_string(), Some(result("C", 3, 0))),
        ]);

        assert_eq!(report.equity_curve.points(), &[1, 0, 1, 2, 3]);
        assert_eq!(report.skipped, vec!["B".to_string()]);
        assert_eq!(
            report.instruments.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["A", "C"]
        );
    }

    #[test]
    fn nothing_traded_has_no_rate() {
        let report = PortfolioReport::aggregate(vec![("A".to_string(), None)]);
        assert!(report.is_empty());
        assert_eq!(report.win_rate, None);
        assert!(report.equity_curve.is_empty());
    }
}
