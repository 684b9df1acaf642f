//! Per-symbol fundamentals datasets.
//!
//! Every provider field is an `Option`: an absent value means "unknown" and is
//! never coerced to zero. Screens skip a symbol when a field they need is
//! `None`.

use std::collections::HashMap;

/// Dividend payments over the provider's trailing window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DividendRecord {
    pub count: u32,
}

/// One quarterly or annual report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialReport {
    pub net_income: Option<f64>,
    pub current_assets: Option<f64>,
    pub current_debt: Option<f64>,
}

/// Reports for a symbol, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialRecord {
    pub reports: Vec<FinancialReport>,
}

impl FinancialRecord {
    pub fn latest(&self) -> Option<&FinancialReport> {
        self.reports.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValuationStats {
    pub price_to_book: Option<f64>,
    pub ttm_eps: Option<f64>,
    /// Percentage points, e.g. `12.5` for a 12.5% margin.
    pub profit_margin: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClosePrice {
    pub close: Option<f64>,
}

pub type DividendSet = HashMap<String, DividendRecord>;
pub type FinancialSet = HashMap<String, FinancialRecord>;
pub type StatsSet = HashMap<String, ValuationStats>;
pub type CloseSet = HashMap<String, ClosePrice>;
