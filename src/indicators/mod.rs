pub mod rolling;

pub use rolling::{rolling_means, RollingMean};

use crate::data::Bar;
use crate::engine::error::EngineError;

//per-bar statistics read by the signal classifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingContext {
    pub percent_change: Option<f64>,
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
}

//precomputes the rolling context for every bar of one instrument
pub fn rolling_context(
    bars: &[Bar],
    short_window: usize,
    long_window: usize,
) -> Result<Vec<RollingContext>, EngineError> {
    if short_window == 0 {
        return Err(EngineError::ZeroWindow {
            name: "short_window",
        });
    }
    if long_window == 0 {
        return Err(EngineError::ZeroWindow {
            name: "long_window",
        });
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let short = rolling_means(&closes, short_window)?;
    let long = rolling_means(&closes, long_window)?;

    Ok(bars
        .iter()
        .zip(short.into_iter().zip(long))
        .map(|(bar, (short_ma, long_ma))| RollingContext {
            percent_change: bar.percent_change(),
            short_ma,
            long_ma,
        })
        .collect())
}
