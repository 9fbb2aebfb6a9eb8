use crate::strategy::{ExitLevels, Signal};
use serde::{Deserialize, Serialize};

//looser screen used for the live view
//asymmetric thresholds, no trend confirmation, fixed target/stop multipliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveMomentumPolicy {
    pub buy_threshold: f64,
    pub short_threshold: f64,
    pub buy_target: f64,
    pub buy_stop: f64,
    pub short_target: f64,
    pub short_stop: f64,
}

impl Default for LiveMomentumPolicy {
    fn default() -> Self {
        LiveMomentumPolicy {
            buy_threshold: 0.25,
            short_threshold: 0.75,
            buy_target: 1.006,
            buy_stop: 0.997,
            short_target: 0.994,
            short_stop: 1.003,
        }
    }
}

impl LiveMomentumPolicy {
    //short_threshold is a magnitude, the short trigger is -short_threshold
    pub fn classify(&self, percent_change: f64) -> Signal {
        if percent_change >= self.buy_threshold {
            Signal::Buy
        } else if percent_change <= -self.short_threshold {
            Signal::Short
        } else {
            Signal::Wait
        }
    }

    pub fn exit_levels(&self, signal: Signal, close: f64) -> Option<ExitLevels> {
        match signal {
            Signal::Buy => Some(ExitLevels {
                target: close * self.buy_target,
                stop_loss: close * self.buy_stop,
            }),
            Signal::Short => Some(ExitLevels {
                target: close * self.short_target,
                stop_loss: close * self.short_stop,
            }),
            Signal::Wait => None,
        }
    }
}
