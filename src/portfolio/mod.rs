pub mod aggregate;
pub mod runner;

pub use aggregate::PortfolioReport;
pub use runner::{load_universe, run_portfolio, Universe};
