use crate::data::bar::Bar;
use crate::data::loader::{filter_by_symbol, load_csv};
use anyhow::Result;
use std::path::Path;

//market data collaborator
//Ok(None) means the provider had nothing for the symbol, Err is a real failure
pub trait BarSource {
    fn history(&self, symbol: &str, bars: usize) -> Result<Option<Vec<Bar>>>;
}

//serves bars from a csv file loaded once up front
#[derive(Debug, Clone)]
pub struct CsvBarSource {
    bars: Vec<Bar>,
}

impl CsvBarSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(CsvBarSource {
            bars: load_csv(path)?,
        })
    }

    pub fn from_bars(bars: Vec<Bar>) -> Self {
        CsvBarSource { bars }
    }

    //all symbols present in the file, in first-seen order
    pub fn symbols(&self) -> Vec<String> {
        let mut seen = indexmap::IndexSet::new();
        for bar in &self.bars {
            seen.insert(bar.symbol.clone());
        }
        seen.into_iter().collect()
    }
}

impl BarSource for CsvBarSource {
    //returns the most recent `bars` rows for the symbol
    fn history(&self, symbol: &str, bars: usize) -> Result<Option<Vec<Bar>>> {
        let mut series = filter_by_symbol(&self.bars, symbol);
        if series.is_empty() {
            return Ok(None);
        }

        let start = series.len().saturating_sub(bars);
        Ok(Some(series.split_off(start)))
    }
}
