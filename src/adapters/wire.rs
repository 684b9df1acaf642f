//! Provider payload shapes and their conversion into domain datasets.
//!
//! Field names follow the IEX Cloud JSON API. Every numeric field is optional
//! because the provider returns `null` or omits fields freely.

use crate::domain::fundamentals::{
    ClosePrice, DividendRecord, FinancialRecord, FinancialReport, ValuationStats,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDividend {
    pub ex_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFinancialReport {
    pub net_income: Option<f64>,
    pub current_assets: Option<f64>,
    pub current_debt: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFinancials {
    #[serde(default)]
    pub financials: Option<Vec<RawFinancialReport>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStats {
    pub price_to_book: Option<f64>,
    #[serde(rename = "ttmEPS")]
    pub ttm_eps: Option<f64>,
    pub profit_margin: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuote {
    pub close: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSymbol {
    pub symbol: String,
    #[serde(default = "enabled_by_default")]
    pub is_enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

/// One symbol's slice of a `/stock/market/batch` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBatchEntry {
    pub dividends: Option<Vec<RawDividend>>,
    pub financials: Option<RawFinancials>,
    pub stats: Option<RawStats>,
    pub quote: Option<RawQuote>,
}

/// Decode a symbol-keyed payload one entry at a time.
///
/// An entry that does not match `T` is logged and dropped; the other symbols
/// in the payload keep their data.
pub fn decode_per_symbol<T: DeserializeOwned>(
    body: HashMap<String, Value>,
    dataset: &str,
) -> HashMap<String, T> {
    body.into_iter()
        .filter_map(|(symbol, value)| match serde_json::from_value(value) {
            Ok(entry) => Some((symbol, entry)),
            Err(e) => {
                warn!(dataset, symbol = %symbol, error = %e, "skipping malformed entry");
                None
            }
        })
        .collect()
}

/// Count dividends already paid by `as_of`.
///
/// Declared dividends with a future ex-date are not counted. Entries without
/// a parseable ex-date are counted.
pub fn dividend_record(raw: &[RawDividend], as_of: NaiveDate) -> DividendRecord {
    let count = raw
        .iter()
        .filter(|d| {
            d.ex_date
                .as_deref()
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                .is_none_or(|date| date <= as_of)
        })
        .count();
    DividendRecord {
        count: count as u32,
    }
}

/// `None` when the payload carries no report list at all.
pub fn financial_record(raw: &RawFinancials) -> Option<FinancialRecord> {
    let reports = raw.financials.as_ref()?;
    Some(FinancialRecord {
        reports: reports
            .iter()
            .map(|r| FinancialReport {
                net_income: r.net_income,
                current_assets: r.current_assets,
                current_debt: r.current_debt,
            })
            .collect(),
    })
}

impl From<&RawStats> for ValuationStats {
    fn from(raw: &RawStats) -> Self {
        ValuationStats {
            price_to_book: raw.price_to_book,
            ttm_eps: raw.ttm_eps,
            profit_margin: raw.profit_margin,
        }
    }
}

impl From<&RawQuote> for ClosePrice {
    fn from(raw: &RawQuote) -> Self {
        ClosePrice { close: raw.close }
    }
}
