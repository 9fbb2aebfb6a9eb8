pub mod symbol;

pub use symbol::Instrument;
