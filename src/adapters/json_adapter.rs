//! Offline data adapter over JSON snapshots.
//!
//! Reads a directory holding any of `symbols.json`, `dividends.json`,
//! `financials.json`, `stats.json` and `close.json`. Each dataset file is an
//! object keyed by symbol, using the same payload shapes the IEX adapter
//! decodes. A missing file means no data for that dataset.

use crate::adapters::wire::{
    RawDividend, RawFinancials, RawQuote, RawStats, RawSymbol, decode_per_symbol, dividend_record,
    financial_record,
};
use crate::domain::error::StockscoreError;
use crate::domain::fundamentals::{
    ClosePrice, CloseSet, DividendSet, FinancialSet, StatsSet, ValuationStats,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct JsonAdapter {
    symbols: Vec<String>,
    dividends: DividendSet,
    financials: FinancialSet,
    stats: StatsSet,
    close: CloseSet,
}

fn load<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Option<T>, StockscoreError> {
    let path = dir.join(name);
    if !path.exists() {
        debug!(file = %path.display(), "snapshot not present");
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| StockscoreError::Decode {
            reason: format!("{}: {}", path.display(), e),
        })
}

/// A symbol-keyed snapshot; malformed entries are dropped individually.
fn load_keyed<T: DeserializeOwned>(
    dir: &Path,
    name: &str,
) -> Result<HashMap<String, T>, StockscoreError> {
    Ok(load::<HashMap<String, Value>>(dir, name)?
        .map(|body| decode_per_symbol(body, name))
        .unwrap_or_default())
}

fn select<T: Clone>(data: &HashMap<String, T>, symbols: &[String]) -> HashMap<String, T> {
    symbols
        .iter()
        .filter_map(|s| data.get(s).map(|v| (s.clone(), v.clone())))
        .collect()
}

impl JsonAdapter {
    /// Load every snapshot in `dir`. Dividends dated after `as_of` are not
    /// counted.
    pub fn open<P: AsRef<Path>>(dir: P, as_of: NaiveDate) -> Result<Self, StockscoreError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(StockscoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("data directory {} not found", dir.display()),
            )));
        }

        let symbols = load::<Vec<RawSymbol>>(dir, "symbols.json")?
            .unwrap_or_default()
            .into_iter()
            .filter(|s| s.is_enabled)
            .map(|s| s.symbol)
            .collect();

        let dividends = load_keyed::<Vec<RawDividend>>(dir, "dividends.json")?
            .into_iter()
            .map(|(symbol, raw)| (symbol, dividend_record(&raw, as_of)))
            .collect();

        let financials = load_keyed::<RawFinancials>(dir, "financials.json")?
            .into_iter()
            .filter_map(|(symbol, raw)| financial_record(&raw).map(|r| (symbol, r)))
            .collect();

        let stats = load_keyed::<RawStats>(dir, "stats.json")?
            .iter()
            .map(|(symbol, raw)| (symbol.clone(), ValuationStats::from(raw)))
            .collect();

        let close = load_keyed::<RawQuote>(dir, "close.json")?
            .iter()
            .map(|(symbol, raw)| (symbol.clone(), ClosePrice::from(raw)))
            .collect();

        Ok(Self {
            symbols,
            dividends,
            financials,
            stats,
            close,
        })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, StockscoreError> {
        let dir = config
            .get_non_empty("provider", "data_dir")
            .map(PathBuf::from)
            .ok_or_else(|| StockscoreError::ConfigMissing {
                section: "provider".into(),
                key: "data_dir".into(),
            })?;
        Self::open(dir, chrono::Utc::now().date_naive())
    }
}

impl DataPort for JsonAdapter {
    fn list_symbols(&self) -> Result<Vec<String>, StockscoreError> {
        Ok(self.symbols.clone())
    }

    fn get_dividends(&self, symbols: &[String]) -> Result<DividendSet, StockscoreError> {
        Ok(select(&self.dividends, symbols))
    }

    fn get_financials(&self, symbols: &[String]) -> Result<FinancialSet, StockscoreError> {
        Ok(select(&self.financials, symbols))
    }

    fn get_stats(&self, symbols: &[String]) -> Result<StatsSet, StockscoreError> {
        Ok(select(&self.stats, symbols))
    }

    fn get_close(&self, symbols: &[String]) -> Result<CloseSet, StockscoreError> {
        Ok(select(&self.close, symbols))
    }
}
