//! Fundamentals data access port.
//!
//! Every query takes one batch of symbols. Implementations may return fewer
//! entries than requested; symbols without data are simply absent.

use crate::domain::error::StockscoreError;
use crate::domain::fundamentals::{CloseSet, DividendSet, FinancialSet, StatsSet};

pub trait DataPort {
    /// The full symbol universe offered by the provider, in provider order.
    fn list_symbols(&self) -> Result<Vec<String>, StockscoreError>;

    fn get_dividends(&self, symbols: &[String]) -> Result<DividendSet, StockscoreError>;

    fn get_financials(&self, symbols: &[String]) -> Result<FinancialSet, StockscoreError>;

    fn get_stats(&self, symbols: &[String]) -> Result<StatsSet, StockscoreError>;

    fn get_close(&self, symbols: &[String]) -> Result<CloseSet, StockscoreError>;
}
