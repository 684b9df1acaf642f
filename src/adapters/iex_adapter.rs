//! IEX Cloud HTTP adapter implementing DataPort.
//!
//! One blocking GET per batch against `/stock/market/batch`. Each request is
//! bounded by the configured timeout; a timeout surfaces as a `Fetch` error
//! like any other transport failure.

use crate::adapters::wire::{
    RawBatchEntry, RawSymbol, decode_per_symbol, dividend_record, financial_record,
};
use crate::domain::config_validation::{DEFAULT_DIVIDEND_RANGE, DEFAULT_TIMEOUT_SECS};
use crate::domain::error::StockscoreError;
use crate::domain::fundamentals::{
    ClosePrice, CloseSet, DividendSet, FinancialSet, StatsSet, ValuationStats,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://cloud.iexapis.com/stable";

pub struct IexAdapter {
    client: Client,
    base_url: String,
    token: String,
    dividend_range: String,
    as_of: NaiveDate,
}

impl IexAdapter {
    pub fn new(
        base_url: &str,
        token: &str,
        timeout: Duration,
        dividend_range: &str,
    ) -> Result<Self, StockscoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StockscoreError::Fetch {
                batch: String::new(),
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            dividend_range: dividend_range.to_string(),
            as_of: chrono::Utc::now().date_naive(),
        })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, StockscoreError> {
        let token = config.get_non_empty("provider", "token").ok_or_else(|| {
            StockscoreError::ConfigMissing {
                section: "provider".into(),
                key: "token".into(),
            }
        })?;
        let base_url = config
            .get_non_empty("provider", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = config.get_int("provider", "timeout_secs", DEFAULT_TIMEOUT_SECS);
        let dividend_range = config
            .get_non_empty("provider", "dividend_range")
            .unwrap_or_else(|| DEFAULT_DIVIDEND_RANGE.to_string());

        Self::new(
            &base_url,
            &token,
            Duration::from_secs(timeout_secs.max(1) as u64),
            &dividend_range,
        )
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        batch: &str,
    ) -> Result<T, StockscoreError> {
        let fetch_err = |reason: String| StockscoreError::Fetch {
            batch: batch.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("token", self.token.as_str())])
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    fetch_err("request timed out".to_string())
                } else {
                    fetch_err(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_err(format!("HTTP {}", status)));
        }

        response.json().map_err(|e| StockscoreError::Decode {
            reason: format!("batch {}: {}", batch, e),
        })
    }

    fn batch(
        &self,
        symbols: &[String],
        types: &str,
    ) -> Result<HashMap<String, RawBatchEntry>, StockscoreError> {
        let joined = symbols.join(",");
        let url = format!("{}/stock/market/batch", self.base_url);
        let mut query = vec![("symbols", joined.as_str()), ("types", types)];
        if types == "dividends" {
            query.push(("range", self.dividend_range.as_str()));
        }
        debug!(types, symbols = symbols.len(), "requesting batch");
        let body: HashMap<String, Value> = self.get_json(&url, &query, &joined)?;
        Ok(decode_per_symbol(body, types))
    }
}

impl DataPort for IexAdapter {
    fn list_symbols(&self) -> Result<Vec<String>, StockscoreError> {
        let url = format!("{}/ref-data/symbols", self.base_url);
        let raw: Vec<RawSymbol> = self.get_json(&url, &[], "ref-data/symbols")?;
        Ok(raw
            .into_iter()
            .filter(|s| s.is_enabled)
            .map(|s| s.symbol)
            .collect())
    }

    fn get_dividends(&self, symbols: &[String]) -> Result<DividendSet, StockscoreError> {
        Ok(self
            .batch(symbols, "dividends")?
            .into_iter()
            .filter_map(|(symbol, entry)| {
                entry
                    .dividends
                    .map(|raw| (symbol, dividend_record(&raw, self.as_of)))
            })
            .collect())
    }

    fn get_financials(&self, symbols: &[String]) -> Result<FinancialSet, StockscoreError> {
        Ok(self
            .batch(symbols, "financials")?
            .into_iter()
            .filter_map(|(symbol, entry)| {
                entry
                    .financials
                    .as_ref()
                    .and_then(financial_record)
                    .map(|record| (symbol, record))
            })
            .collect())
    }

    fn get_stats(&self, symbols: &[String]) -> Result<StatsSet, StockscoreError> {
        Ok(self
            .batch(symbols, "stats")?
            .into_iter()
            .filter_map(|(symbol, entry)| {
                entry
                    .stats
                    .as_ref()
                    .map(|raw| (symbol, ValuationStats::from(raw)))
            })
            .collect())
    }

    fn get_close(&self, symbols: &[String]) -> Result<CloseSet, StockscoreError> {
        Ok(self
            .batch(symbols, "quote")?
            .into_iter()
            .filter_map(|(symbol, entry)| {
                entry
                    .quote
                    .as_ref()
                    .map(|raw| (symbol, ClosePrice::from(raw)))
            })
            .collect())
    }
}
