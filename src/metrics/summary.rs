use crate::engine::trade::Trade;
use crate::metrics::timeseries::{max_drawdown, EquityCurve};
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//summary of one instrument's simulated trades
//only built for a non-empty trade list, so win_rate is always a real number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub trade_count: usize,
    pub win_count: usize,
    pub loss_count: usize,
    //percent, 0..=100
    pub win_rate: f64,
    pub avg_move_pct: f64,
    pub move_std_pct: f64,
    pub max_drawdown: i64,
}

impl BacktestSummary {
    //None for an empty trade list
    pub fn from_trades(trades: &[Trade]) -> Option<Self> {
        if trades.is_empty() {
            return None;
        }

        let trade_count = trades.len();
        let win_count = trades.iter().filter(|t| t.is_win()).count();
        let loss_count = trade_count - win_count;

        let moves: Vec<f64> = trades.iter().map(|t| t.move_pct()).collect();
        let avg_move_pct = moves.iter().mean();
        let move_std_pct = if moves.len() > 1 {
            moves.iter().std_dev()
        } else {
            0.0
        };

        Some(BacktestSummary {
            trade_count,
            win_count,
            loss_count,
            win_rate: win_rate(win_count, trade_count).unwrap_or(0.0),
            avg_move_pct,
            move_std_pct,
            max_drawdown: max_drawdown(&EquityCurve::from_trades(trades)),
        })
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self, instrument: &str) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![
            Cell::new("Metric"),
            Cell::new(instrument),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Trades"),
            Cell::new(&format!("{}", self.trade_count)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Wins : Losses"),
            Cell::new(&format!("{} : {}", self.win_count, self.loss_count)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Win Rate"),
            Cell::new(&format!("{:.2}%", self.win_rate)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Avg Move"),
            Cell::new(&format!("{:.3}%", self.avg_move_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Move Std Dev"),
            Cell::new(&format!("{:.3}%", self.move_std_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Max Drawdown (net wins)"),
            Cell::new(&format!("{}", self.max_drawdown)),
        ]));

        table.printstd();
    }
}

//wins / trades as a percentage, None when there were no trades
pub fn win_rate(wins: usize, trades: usize) -> Option<f64> {
    if trades == 0 {
        return None;
    }
    Some(wins as f64 / trades as f64 * 100.0)
}
