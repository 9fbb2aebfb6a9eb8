pub mod bar;
pub mod loader;
pub mod source;

pub use bar::{Bar, BarError};
pub use loader::{filter_by_symbol, load_csv};
pub use source::{BarSource, CsvBarSource};
