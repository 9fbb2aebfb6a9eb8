use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BarError {
    #[error("Invalid OHLC values: high ({high}) < low ({low})")]
    InvalidHighLow { high: f64, low: f64 },
    #[error("Invalid OHLC values: close ({close}) outside high-low range [{low}, {high}]")]
    InvalidClose { close: f64, high: f64, low: f64 },
    #[error("Invalid OHLC values: open ({open}) outside high-low range [{low}, {high}]")]
    InvalidOpen { open: f64, high: f64, low: f64 },
    #[error("Negative price: {0}")]
    NegativePrice(f64),
    #[error("Non-finite price: {0}")]
    NonFinitePrice(f64),
}

//one trading day of prices for one instrument
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub symbol: String,
}

impl Bar {
    //creates a new Bar with validation
    //an open of exactly zero is accepted, the engine skips such bars
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        symbol: String,
    ) -> Result<Self, BarError> {
        if let Some(&bad) = [open, high, low, close].iter().find(|p| !p.is_finite()) {
            return Err(BarError::NonFinitePrice(bad));
        }

        if let Some(&negative) = [open, high, low, close].iter().find(|p| **p < 0.0) {
            return Err(BarError::NegativePrice(negative));
        }

        if high < low {
            return Err(BarError::InvalidHighLow { high, low });
        }

        if close < low || close > high {
            return Err(BarError::InvalidClose { close, high, low });
        }

        //a zero open is a data gap from the provider, not an ohlc violation
        if open != 0.0 && (open < low || open > high) {
            return Err(BarError::InvalidOpen { open, high, low });
        }

        Ok(Bar {
            date,
            open,
            high,
            low,
            close,
            symbol,
        })
    }

    //creates a Bar without validation
    pub fn new_unchecked(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        symbol: String,
    ) -> Self {
        Bar {
            date,
            open,
            high,
            low,
            close,
            symbol,
        }
    }

    //intraday move from open to close in percentage points
    //None when the open is zero or either price is not a number
    pub fn percent_change(&self) -> Option<f64> {
        if self.open == 0.0 {
            return None;
        }
        Some((self.close - self.open) / self.open * 100.0).filter(|p| p.is_finite())
    }
}
