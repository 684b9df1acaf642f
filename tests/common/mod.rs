#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use stockscore::domain::error::StockscoreError;
use stockscore::domain::fundamentals::{
    ClosePrice, CloseSet, DividendRecord, DividendSet, FinancialRecord, FinancialReport,
    FinancialSet, StatsSet, ValuationStats,
};
use stockscore::ports::data_port::DataPort;

/// In-memory provider. Requests touching a symbol registered with
/// `with_failing_symbol` fail for the whole batch.
pub struct MockDataPort {
    pub symbols: Vec<String>,
    pub dividends: DividendSet,
    pub financials: FinancialSet,
    pub stats: StatsSet,
    pub close: CloseSet,
    pub failing: HashSet<String>,
    pub requests: RefCell<Vec<(String, usize)>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            dividends: HashMap::new(),
            financials: HashMap::new(),
            stats: HashMap::new(),
            close: HashMap::new(),
            failing: HashSet::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_symbols(mut self, symbols: &[&str]) -> Self {
        self.symbols = symbols.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_dividends(mut self, symbol: &str, count: u32) -> Self {
        self.dividends
            .insert(symbol.to_string(), DividendRecord { count });
        self
    }

    pub fn with_financials(mut self, symbol: &str, reports: Vec<FinancialReport>) -> Self {
        self.financials
            .insert(symbol.to_string(), FinancialRecord { reports });
        self
    }

    pub fn with_stats(mut self, symbol: &str, stats: ValuationStats) -> Self {
        self.stats.insert(symbol.to_string(), stats);
        self
    }

    pub fn with_close(mut self, symbol: &str, close: f64) -> Self {
        self.close
            .insert(symbol.to_string(), ClosePrice { close: Some(close) });
        self
    }

    pub fn with_failing_symbol(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }

    pub fn request_count(&self, dataset: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|(d, _)| d == dataset)
            .count()
    }

    pub fn largest_request(&self) -> usize {
        self.requests
            .borrow()
            .iter()
            .map(|(_, n)| *n)
            .max()
            .unwrap_or(0)
    }

    fn answer<T: Clone>(
        &self,
        dataset: &str,
        data: &HashMap<String, T>,
        symbols: &[String],
    ) -> Result<HashMap<String, T>, StockscoreError> {
        self.requests
            .borrow_mut()
            .push((dataset.to_string(), symbols.len()));
        if symbols.iter().any(|s| self.failing.contains(s)) {
            return Err(StockscoreError::Fetch {
                batch: symbols.join(","),
                reason: "request timed out".into(),
            });
        }
        Ok(symbols
            .iter()
            .filter_map(|s| data.get(s).map(|v| (s.clone(), v.clone())))
            .collect())
    }
}

impl DataPort for MockDataPort {
    fn list_symbols(&self) -> Result<Vec<String>, StockscoreError> {
        Ok(self.symbols.clone())
    }

    fn get_dividends(&self, symbols: &[String]) -> Result<DividendSet, StockscoreError> {
        self.answer("dividends", &self.dividends, symbols)
    }

    fn get_financials(&self, symbols: &[String]) -> Result<FinancialSet, StockscoreError> {
        self.answer("financials", &self.financials, symbols)
    }

    fn get_stats(&self, symbols: &[String]) -> Result<StatsSet, StockscoreError> {
        self.answer("stats", &self.stats, symbols)
    }

    fn get_close(&self, symbols: &[String]) -> Result<CloseSet, StockscoreError> {
        self.answer("close", &self.close, symbols)
    }
}

pub fn report(net_income: f64, current_assets: f64, current_debt: f64) -> FinancialReport {
    FinancialReport {
        net_income: Some(net_income),
        current_assets: Some(current_assets),
        current_debt: Some(current_debt),
    }
}

pub fn stats(price_to_book: f64, ttm_eps: f64, profit_margin: f64) -> ValuationStats {
    ValuationStats {
        price_to_book: Some(price_to_book),
        ttm_eps: Some(ttm_eps),
        profit_margin: Some(profit_margin),
    }
}

pub fn strings(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

/// Three symbols with known per-screen points.
///
/// VAL: dividend 2, net income 4, current ratio 2, p/b 1, p/e 2, margin 2 = 13
/// MID: dividend 1, net income 0, current ratio 1, p/b 0, p/e 1, margin 1 = 4
/// GRO: no dividends, net income missing, no stats = 0
pub fn sample_port() -> MockDataPort {
    MockDataPort::new()
        .with_symbols(&["VAL", "MID", "GRO"])
        .with_dividends("VAL", 8)
        .with_dividends("MID", 5)
        .with_financials(
            "VAL",
            vec![
                report(10.0, 150.0, 100.0),
                report(9.0, 140.0, 100.0),
                report(8.0, 130.0, 100.0),
                report(7.0, 120.0, 100.0),
            ],
        )
        .with_financials(
            "MID",
            vec![report(10.0, 120.0, 100.0), report(-3.0, 110.0, 100.0)],
        )
        .with_financials(
            "GRO",
            vec![FinancialReport {
                net_income: None,
                current_assets: None,
                current_debt: Some(50.0),
            }],
        )
        .with_stats("VAL", stats(0.9, 2.0, 25.0))
        .with_stats("MID", stats(3.0, 2.0, 12.0))
        .with_close("VAL", 20.0)
        .with_close("MID", 40.0)
}
