use crate::engine::error::EngineError;
use std::collections::VecDeque;

//trailing mean of `window` values
//feeds one value at a time and keeps a running sum so a full series costs O(n)
//non-finite values are gaps: the mean is None while one sits inside the window
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    values: VecDeque<f64>,
    //sum of the finite values in the window only
    sum: f64,
    gaps: usize,
}

impl RollingMean {
    pub fn new(window: usize) -> Result<Self, EngineError> {
        if window == 0 {
            return Err(EngineError::ZeroWindow { name: "window" });
        }
        Ok(RollingMean {
            window,
            values: VecDeque::with_capacity(window),
            sum: 0.0,
            gaps: 0,
        })
    }

    //pushes a value and returns the mean once the window is full and gap free
    pub fn update(&mut self, value: f64) -> Option<f64> {
        self.values.push_back(value);
        if value.is_finite() {
            self.sum += value;
        } else {
            self.gaps += 1;
        }

        if self.values.len() > self.window {
            if let Some(front) = self.values.pop_front() {
                if front.is_finite() {
                    self.sum -= front;
                } else {
                    self.gaps -= 1;
                }
            }
        }

        if self.values.len() == self.window && self.gaps == 0 {
            Some(self.sum / self.window as f64)
        } else {
            None
        }
    }
}

//moving average aligned to each index
//None for the first window - 1 positions
pub fn rolling_means(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, EngineError> {
    let mut mean = RollingMean::new(window)?;
    Ok(values.iter().map(|&v| mean.update(v)).collect())
}
