//! Ranking output port.

use crate::domain::error::StockscoreError;
use crate::domain::score::RankedScore;

/// Port for persisting a final ranking.
pub trait ReportPort {
    fn write(&self, ranking: &[RankedScore], output_path: &str) -> Result<(), StockscoreError>;
}
