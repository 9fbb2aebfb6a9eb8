use serde::{Deserialize, Serialize};
use std::fmt;

//a listed instrument, as the data provider names it (eg RELIANCE.NS)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    pub ticker: String,
}

//exchange suffixes dropped from display names
const EXCHANGE_SUFFIXES: [&str; 2] = [".NS", ".BO"];

impl Instrument {
    pub fn new(ticker: impl Into<String>) -> Self {
        Instrument {
            ticker: ticker.into(),
        }
    }

    //ticker without the exchange suffix
    pub fn display_name(&self) -> &str {
        EXCHANGE_SUFFIXES
            .iter()
            .find_map(|suffix| self.ticker.strip_suffix(suffix))
            .unwrap_or(&self.ticker)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
