//! Score store and top-N ranking.

use indexmap::IndexMap;

pub type Score = i64;

/// Symbol → Value Score for one run.
///
/// Keys are fixed when the store is created. Awards for a symbol the store
/// does not know are ignored, so screens cannot grow the universe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreStore {
    scores: IndexMap<String, Score>,
}

impl ScoreStore {
    /// One zero entry per symbol, in universe order.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scores: symbols.into_iter().map(|s| (s.into(), 0)).collect(),
        }
    }

    /// Add `points` to `symbol`. Returns `false` (and changes nothing) for an
    /// unknown symbol.
    pub fn award(&mut self, symbol: &str, points: Score) -> bool {
        match self.scores.get_mut(symbol) {
            Some(score) => {
                *score += points;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, symbol: &str) -> Option<Score> {
        self.scores.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.scores.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Score)> {
        self.scores.iter().map(|(s, &v)| (s.as_str(), v))
    }

    /// Highest `n` scores, descending; all entries when `n` is `None`.
    ///
    /// Equal scores keep the store's insertion order.
    pub fn top(&self, n: Option<usize>) -> Vec<RankedScore> {
        let mut ranked: Vec<(&str, Score)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n.unwrap_or(self.len()))
            .enumerate()
            .map(|(i, (symbol, score))| RankedScore {
                rank: i + 1,
                symbol: symbol.to_string(),
                score,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedScore {
    pub rank: usize,
    pub symbol: String,
    pub score: Score,
}
