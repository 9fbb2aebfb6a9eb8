use crate::engine::trade::Trade;
use serde::{Deserialize, Serialize};

//cumulative net wins, one point per trade
//the origin 0 is implicit and not stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityCurve {
    points: Vec<i64>,
}

impl EquityCurve {
    pub fn new() -> Self {
        EquityCurve { points: Vec::new() }
    }

    //builds the curve from trades in chronological order
    pub fn from_trades(trades: &[Trade]) -> Self {
        Self::from_increments(trades.iter().map(|t| t.outcome.delta()))
    }

    //accumulates +1/-1 steps starting from 0
    pub fn from_increments(increments: impl IntoIterator<Item = i64>) -> Self {
        let mut curve = EquityCurve::new();
        for delta in increments {
            curve.push(delta);
        }
        curve
    }

    pub fn push(&mut self, delta: i64) {
        let next = self.last() + delta;
        self.points.push(next);
    }

    //final net win count, 0 for an empty curve
    pub fn last(&self) -> i64 {
        self.points.last().copied().unwrap_or(0)
    }

    pub fn points(&self) -> &[i64] {
        &self.points
    }

    //points prefixed with the 0 origin, handy for plotting
    pub fn with_origin(&self) -> Vec<i64> {
        std::iter::once(0).chain(self.points.iter().copied()).collect()
    }

    //step between consecutive points, first step measured from 0
    pub fn increments(&self) -> Vec<i64> {
        self.with_origin().windows(2).map(|w| w[1] - w[0]).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

//largest peak-to-trough fall in net wins, origin included
pub fn max_drawdown(curve: &EquityCurve) -> i64 {
    let mut peak = 0i64;
    let mut worst = 0i64;

    for &point in curve.points() {
        peak = peak.max(point);
        worst = worst.max(peak - point);
    }

    worst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_from_zero() {
        let curve = EquityCurve::from_increments([1, 1, -1, 1]);
        assert_eq!(curve.points(), &[1, 2, 1, 2]);
        assert_eq!(curve.with_origin(), vec![0, 1, 2, 1, 2]);
        assert_eq!(curve.increments(), vec![1, 1, -1, 1]);
    }

    #[test]
    fn drawdown_counts_from_origin() {
        assert_eq!(max_drawdown(&EquityCurve::from_increments([-1, -1, 1])), 2);
        assert_eq!(max_drawdown(&EquityCurve::from_increments([1, 1, -1, -1, -1, 1])), 3);
        assert_eq!(max_drawdown(&EquityCurve::new()), 0);
    }
}
