//! Batch-by-batch dataset retrieval.
//!
//! A failed batch (transport error, timeout, undecodable body) is logged and
//! contributes nothing, which is indistinguishable from every symbol in that
//! batch having no data. Entries for symbols outside the requested batch are
//! dropped.

use crate::domain::batch::Batch;
use crate::domain::error::StockscoreError;
use crate::domain::fundamentals::{CloseSet, DividendSet, FinancialSet, StatsSet};
use crate::ports::data_port::DataPort;
use std::collections::HashMap;
use tracing::{debug, warn};

fn fetch_batched<T, F>(batches: &[Batch], dataset: &str, fetch: F) -> HashMap<String, T>
where
    F: Fn(&[String]) -> Result<HashMap<String, T>, StockscoreError>,
{
    let mut merged = HashMap::new();

    for batch in batches {
        match fetch(&batch.symbols) {
            Ok(entries) => {
                let received = entries.len();
                merged.extend(
                    entries
                        .into_iter()
                        .filter(|(symbol, _)| batch.symbols.contains(symbol)),
                );
                debug!(dataset, batch = batch.index, received, "batch fetched");
            }
            Err(e) => {
                warn!(
                    dataset,
                    batch = batch.index,
                    symbols = batch.len(),
                    error = %e,
                    "batch fetch failed, treating as no data"
                );
            }
        }
    }

    merged
}

pub fn fetch_dividends(port: &dyn DataPort, batches: &[Batch]) -> DividendSet {
    fetch_batched(batches, "dividends", |symbols| port.get_dividends(symbols))
}

pub fn fetch_financials(port: &dyn DataPort, batches: &[Batch]) -> FinancialSet {
    fetch_batched(batches, "financials", |symbols| port.get_financials(symbols))
}

pub fn fetch_stats(port: &dyn DataPort, batches: &[Batch]) -> StatsSet {
    fetch_batched(batches, "stats", |symbols| port.get_stats(symbols))
}

pub fn fetch_close(port: &dyn DataPort, batches: &[Batch]) -> CloseSet {
    fetch_batched(batches, "close", |symbols| port.get_close(symbols))
}
