//! Symbol universe for a scoring run.
//!
//! Parses configured symbol lists, cleans provider lists, and builds the
//! per-run state: the universe itself, a zeroed score store and the request
//! batches.

use crate::domain::batch::{make_batches, Batch};
use crate::domain::error::StockscoreError;
use crate::domain::score::ScoreStore;
use crate::ports::data_port::DataPort;
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    pub symbols: Vec<String>,
}

impl Universe {
    pub fn count(&self) -> usize {
        self.symbols.len()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),
}

impl From<UniverseError> for StockscoreError {
    fn from(err: UniverseError) -> Self {
        StockscoreError::InvalidSymbol {
            reason: err.to_string(),
        }
    }
}

/// Strict parse of a comma-separated list typed by a user.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(UniverseError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

/// Lenient clean-up of a provider or file list: blanks are dropped and only
/// the first occurrence of a symbol is kept.
pub fn normalize_symbols<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut symbols = Vec::new();
    for item in raw {
        let symbol = item.as_ref().trim().to_uppercase();
        if symbol.is_empty() {
            continue;
        }
        if !seen.insert(symbol.clone()) {
            warn!(symbol = %symbol, "dropping duplicate symbol");
            continue;
        }
        symbols.push(symbol);
    }
    symbols
}

/// Everything a run needs before any fundamentals are fetched.
#[derive(Debug, Clone)]
pub struct Run {
    pub universe: Universe,
    pub scores: ScoreStore,
    pub batches: Vec<Batch>,
}

impl Run {
    pub fn new(symbols: Vec<String>, batch_size: usize) -> Result<Self, StockscoreError> {
        if symbols.is_empty() {
            return Err(StockscoreError::EmptyUniverse);
        }
        let scores = ScoreStore::new(symbols.iter().cloned());
        let batches = make_batches(&symbols, batch_size);
        Ok(Self {
            universe: Universe { symbols },
            scores,
            batches,
        })
    }
}

/// Resolve the universe (configured symbols win over the provider's list),
/// zero the scores, and batch the symbols.
pub fn setup(
    data_port: &dyn DataPort,
    configured: Option<Vec<String>>,
    batch_size: usize,
) -> Result<Run, StockscoreError> {
    let symbols = match configured {
        Some(symbols) => normalize_symbols(symbols),
        None => normalize_symbols(data_port.list_symbols()?),
    };

    let run = Run::new(symbols, batch_size)?;
    info!(
        symbols = run.universe.count(),
        batches = run.batches.len(),
        batch_size,
        "universe ready"
    );
    Ok(run)
}
