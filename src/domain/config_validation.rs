//! Configuration validation.
//!
//! Validates all config fields before any provider request is made.

use crate::domain::batch::MAX_BATCH_SIZE;
use crate::domain::error::StockscoreError;
use crate::domain::universe::parse_symbols;
use crate::ports::config_port::ConfigPort;
use tracing::warn;

pub const DEFAULT_TIMEOUT_SECS: i64 = 10;
/// Trailing window for dividend history. One year keeps `count / 4` at one
/// point for a quarterly payer.
pub const DEFAULT_DIVIDEND_RANGE: &str = "1y";
pub const DIVIDEND_RANGES: [&str; 6] = ["1m", "3m", "6m", "1y", "2y", "5y"];

const KNOWN_SECTIONS: [&str; 4] = ["default", "provider", "universe", "report"];

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), StockscoreError> {
    for section in config.sections() {
        if !KNOWN_SECTIONS.contains(&section.as_str()) {
            warn!(section = %section, "ignoring unknown config section");
        }
    }
    validate_provider_config(config)?;
    validate_universe_config(config)?;
    validate_report_config(config)?;
    Ok(())
}

pub fn validate_provider_config(config: &dyn ConfigPort) -> Result<(), StockscoreError> {
    validate_provider_kind(config)?;
    validate_batch_size(config)?;
    validate_timeout(config)?;
    validate_dividend_range(config)?;
    Ok(())
}

pub fn validate_universe_config(config: &dyn ConfigPort) -> Result<(), StockscoreError> {
    if let Some(symbols) = config.get_non_empty("universe", "symbols") {
        parse_symbols(&symbols).map_err(|e| StockscoreError::ConfigInvalid {
            section: "universe".to_string(),
            key: "symbols".to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), StockscoreError> {
    if config.has_key("report", "top") && config.get_int("report", "top", 0) < 1 {
        return Err(StockscoreError::ConfigInvalid {
            section: "report".to_string(),
            key: "top".to_string(),
            reason: "top must be a positive integer".to_string(),
        });
    }
    Ok(())
}

fn validate_provider_kind(config: &dyn ConfigPort) -> Result<(), StockscoreError> {
    let kind = config
        .get_non_empty("provider", "kind")
        .unwrap_or_else(|| "iex".to_string());

    match kind.as_str() {
        "iex" => match config.get_non_empty("provider", "token") {
            Some(_) => Ok(()),
            None => Err(StockscoreError::ConfigMissing {
                section: "provider".to_string(),
                key: "token".to_string(),
            }),
        },
        "json" => match config.get_non_empty("provider", "data_dir") {
            Some(_) => Ok(()),
            None => Err(StockscoreError::ConfigMissing {
                section: "provider".to_string(),
                key: "data_dir".to_string(),
            }),
        },
        other => Err(StockscoreError::ConfigInvalid {
            section: "provider".to_string(),
            key: "kind".to_string(),
            reason: format!("unknown provider kind '{}', expected iex or json", other),
        }),
    }
}

fn validate_batch_size(config: &dyn ConfigPort) -> Result<(), StockscoreError> {
    let value = config.get_int("provider", "batch_size", MAX_BATCH_SIZE as i64);
    if value < 1 || value > MAX_BATCH_SIZE as i64 {
        return Err(StockscoreError::ConfigInvalid {
            section: "provider".to_string(),
            key: "batch_size".to_string(),
            reason: format!("batch_size must be between 1 and {}", MAX_BATCH_SIZE),
        });
    }
    Ok(())
}

fn validate_timeout(config: &dyn ConfigPort) -> Result<(), StockscoreError> {
    let value = config.get_int("provider", "timeout_secs", DEFAULT_TIMEOUT_SECS);
    if value < 1 {
        return Err(StockscoreError::ConfigInvalid {
            section: "provider".to_string(),
            key: "timeout_secs".to_string(),
            reason: "timeout_secs must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_dividend_range(config: &dyn ConfigPort) -> Result<(), StockscoreError> {
    let value = config
        .get_non_empty("provider", "dividend_range")
        .unwrap_or_else(|| DEFAULT_DIVIDEND_RANGE.to_string());
    if !DIVIDEND_RANGES.contains(&value.as_str()) {
        return Err(StockscoreError::ConfigInvalid {
            section: "provider".to_string(),
            key: "dividend_range".to_string(),
            reason: format!("unsupported range '{}'", value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn valid_iex_config_passes() {
        let config = make_config(
            r#"
[provider]
kind = iex
token = pk_test
batch_size = 100
timeout_secs = 5
dividend_range = 5y

[universe]
symbols = AAPL,MSFT,KO

[report]
top = 10
"#,
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn valid_json_config_passes() {
        let config = make_config("[provider]\nkind = json\ndata_dir = /tmp/data\n");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn default_window_gives_quarterly_payer_one_point() {
        use crate::adapters::wire::{RawDividend, dividend_record};
        use crate::domain::screen::dividend_points;
        use chrono::NaiveDate;

        let config = make_config("[provider]\ntoken = pk_test\n");
        assert!(validate_config(&config).is_ok());
        assert_eq!(DEFAULT_DIVIDEND_RANGE, "1y");

        let last_year: Vec<RawDividend> = serde_json::from_str(
            r#"[{"exDate": "2023-08-11"}, {"exDate": "2023-11-10"},
                {"exDate": "2024-02-09"}, {"exDate": "2024-05-10"}]"#,
        )
        .unwrap();
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(dividend_points(dividend_record(&last_year, as_of).count), 1);
    }

    #[test]
    fn unknown_section_is_not_an_error() {
        let config = make_config("[provider]\nkind = json\ndata_dir = d\n[screens]\npe = 20\n");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn iex_without_token_fails() {
        let config = make_config("[provider]\nkind = iex\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, StockscoreError::ConfigMissing { key, .. } if key == "token"));
    }

    #[test]
    fn default_kind_is_iex() {
        let config = make_config("[provider]\nbatch_size = 50\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, StockscoreError::ConfigMissing { key, .. } if key == "token"));
    }

    #[test]
    fn json_without_data_dir_fails() {
        let config = make_config("[provider]\nkind = json\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, StockscoreError::ConfigMissing { key, .. } if key == "data_dir"));
    }

    #[test]
    fn unknown_kind_fails() {
        let config = make_config("[provider]\nkind = yahoo\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, StockscoreError::ConfigInvalid { key, .. } if key == "kind"));
    }

    #[test]
    fn batch_size_above_limit_fails() {
        let config = make_config("[provider]\nkind = json\ndata_dir = d\nbatch_size = 101\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, StockscoreError::ConfigInvalid { key, .. } if key == "batch_size"));
    }

    #[test]
    fn batch_size_zero_fails() {
        let config = make_config("[provider]\nkind = json\ndata_dir = d\nbatch_size = 0\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, StockscoreError::ConfigInvalid { key, .. } if key == "batch_size"));
    }

    #[test]
    fn timeout_zero_fails() {
        let config = make_config("[provider]\nkind = json\ndata_dir = d\ntimeout_secs = 0\n");
        let err = validate_config(&config).unwrap_err();
        assert!(
            matches!(err, StockscoreError::ConfigInvalid { key, .. } if key == "timeout_secs")
        );
    }

    #[test]
    fn unsupported_dividend_range_fails() {
        let config = make_config("[provider]\nkind = json\ndata_dir = d\ndividend_range = 10y\n");
        let err = validate_config(&config).unwrap_err();
        assert!(
            matches!(err, StockscoreError::ConfigInvalid { key, .. } if key == "dividend_range")
        );
    }

    #[test]
    fn duplicate_configured_symbol_fails() {
        let config =
            make_config("[provider]\nkind = json\ndata_dir = d\n[universe]\nsymbols = AAPL,aapl\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, StockscoreError::ConfigInvalid { key, .. } if key == "symbols"));
    }

    #[test]
    fn top_zero_fails() {
        let config = make_config("[provider]\nkind = json\ndata_dir = d\n[report]\ntop = 0\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, StockscoreError::ConfigInvalid { key, .. } if key == "top"));
    }

    #[test]
    fn non_numeric_top_fails() {
        let config = make_config("[provider]\nkind = json\ndata_dir = d\n[report]\ntop = all\n");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, StockscoreError::ConfigInvalid { key, .. } if key == "top"));
    }
}
