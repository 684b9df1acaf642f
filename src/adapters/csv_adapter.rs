//! CSV symbol lists and ranking reports.

use crate::domain::error::StockscoreError;
use crate::domain::score::RankedScore;
use crate::domain::universe::normalize_symbols;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

/// Read symbols from the first column of a CSV file.
///
/// A header row whose first cell is `symbol` (any case) is skipped. Blank
/// cells and repeated symbols are dropped.
pub fn read_symbols<P: AsRef<Path>>(path: P) -> Result<Vec<String>, StockscoreError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut raw = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| StockscoreError::InvalidSymbol {
            reason: format!("{}: CSV parse error: {}", path.display(), e),
        })?;
        let Some(cell) = record.get(0) else {
            continue;
        };
        if i == 0 && cell.eq_ignore_ascii_case("symbol") {
            continue;
        }
        raw.push(cell.to_string());
    }

    Ok(normalize_symbols(raw))
}

/// Writes `rank,symbol,score` rows.
pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write(&self, ranking: &[RankedScore], output_path: &str) -> Result<(), StockscoreError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| StockscoreError::Report {
            reason: format!("failed to open {}: {}", output_path, e),
        })?;

        wtr.write_record(["rank", "symbol", "score"])
            .map_err(|e| StockscoreError::Report {
                reason: e.to_string(),
            })?;
        for row in ranking {
            wtr.write_record([
                row.rank.to_string(),
                row.symbol.clone(),
                row.score.to_string(),
            ])
            .map_err(|e| StockscoreError::Report {
                reason: e.to_string(),
            })?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_first_column_and_skips_header() {
        let file = temp_csv("symbol,name\naapl,Apple Inc.\nMSFT,Microsoft\n\nKO,Coca-Cola\n");
        let symbols = read_symbols(file.path()).unwrap();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "KO"]);
    }

    #[test]
    fn reads_headerless_list() {
        let file = temp_csv("T\nVZ\nT\n");
        let symbols = read_symbols(file.path()).unwrap();
        assert_eq!(symbols, vec!["T", "VZ"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_symbols("/nonexistent/symbols.csv").unwrap_err();
        assert!(matches!(err, StockscoreError::Io(_)));
    }

    #[test]
    fn writes_ranking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.csv");
        let ranking = vec![
            RankedScore {
                rank: 1,
                symbol: "B".into(),
                score: 5,
            },
            RankedScore {
                rank: 2,
                symbol: "A".into(),
                score: 3,
            },
        ];

        CsvReportAdapter
            .write(&ranking, path.to_str().unwrap())
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "rank,symbol,score\n1,B,5\n2,A,3\n");
    }
}
