use crate::strategy::Signal;
use serde::{Deserialize, Serialize};

//momentum entry confirmed by moving-average trend
//buy when the bar rallies at least `threshold` percent and the short average is above the long one
//short on the mirror image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedTrendPolicy {
    pub threshold: f64,
}

impl Default for ConfirmedTrendPolicy {
    fn default() -> Self {
        ConfirmedTrendPolicy { threshold: 0.60 }
    }
}

impl ConfirmedTrendPolicy {
    pub fn new(threshold: f64) -> Self {
        ConfirmedTrendPolicy { threshold }
    }

    pub fn classify(
        &self,
        percent_change: f64,
        short_ma: Option<f64>,
        long_ma: Option<f64>,
    ) -> Signal {
        let (short_ma, long_ma) = match (short_ma, long_ma) {
            (Some(s), Some(l)) => (s, l),
            _ => return Signal::Wait,
        };

        if percent_change >= self.threshold && short_ma > long_ma {
            Signal::Buy
        } else if percent_change <= -self.threshold && short_ma < long_ma {
            Signal::Short
        } else {
            Signal::Wait
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_needs_momentum_and_uptrend() {
        let policy = ConfirmedTrendPolicy::default();
        assert_eq!(policy.classify(0.60, Some(101.0), Some(100.0)), Signal::Buy);
        assert_eq!(policy.classify(0.59, Some(101.0), Some(100.0)), Signal::Wait);
        assert_eq!(policy.classify(1.5, Some(100.0), Some(100.0)), Signal::Wait);
        assert_eq!(policy.classify(1.5, Some(99.0), Some(100.0)), Signal::Wait);
    }

    #[test]
    fn short_needs_momentum_and_downtrend() {
        let policy = ConfirmedTrendPolicy::default();
        assert_eq!(policy.classify(-0.60, Some(99.0), Some(100.0)), Signal::Short);
        assert_eq!(policy.classify(-0.59, Some(99.0), Some(100.0)), Signal::Wait);
        assert_eq!(policy.classify(-2.0, Some(101.0), Some(100.0)), Signal::Wait);
    }

    #[test]
    fn missing_average_always_waits() {
        let policy = ConfirmedTrendPolicy::default();
        assert_eq!(policy.classify(5.0, None, Some(100.0)), Signal::Wait);
        assert_eq!(policy.classify(-5.0, Some(99.0), None), Signal::Wait);
        assert_eq!(policy.classify(5.0, None, None), Signal::Wait);
    }
}
