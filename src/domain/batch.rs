//! Symbol batching for provider requests.
//!
//! The provider caps the number of symbols per request. [`set_batches`] splits
//! the universe into consecutive, non-overlapping groups that keep the
//! universe's order, so concatenating the batches in index order rebuilds it.

use std::collections::BTreeMap;

pub const MAX_BATCH_SIZE: usize = 100;

/// A group of at most [`MAX_BATCH_SIZE`] symbols sent in one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub index: usize,
    pub symbols: Vec<String>,
}

impl Batch {
    /// Comma-joined form expected by the provider's `symbols=` parameter.
    pub fn joined(&self) -> String {
        self.symbols.join(",")
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Partition `symbols` into batches of at most `max_size` symbols.
///
/// A `max_size` of zero is treated as one. An empty universe yields no
/// batches; an exact multiple of `max_size` yields no empty trailing batch.
pub fn make_batches(symbols: &[String], max_size: usize) -> Vec<Batch> {
    symbols
        .chunks(max_size.max(1))
        .enumerate()
        .map(|(index, chunk)| Batch {
            index,
            symbols: chunk.to_vec(),
        })
        .collect()
}

/// Batch index → comma-joined symbols, in batch order.
pub fn set_batches(symbols: &[String], max_size: usize) -> BTreeMap<usize, String> {
    make_batches(symbols, max_size)
        .into_iter()
        .map(|b| (b.index, b.joined()))
        .collect()
}
