//! Fundamental screens.
//!
//! Each screen takes the dataset(s) it needs and the score store by value,
//! adds its points, and hands the store back. Screens never add symbols to
//! the store and never fail: a symbol with missing or unusable data is
//! skipped for that screen only.

use crate::domain::fundamentals::{
    CloseSet, DividendSet, FinancialRecord, FinancialReport, FinancialSet, StatsSet,
};
use crate::domain::score::{Score, ScoreStore};
use std::fmt;

pub const PRICE_TO_BOOK_MAX: f64 = 1.2;
pub const PE_RATIO_FAIR: f64 = 30.0;
pub const PE_RATIO_CHEAP: f64 = 15.0;
pub const PROFIT_MARGIN_GOOD: f64 = 10.0;
pub const PROFIT_MARGIN_GREAT: f64 = 20.0;
pub const CURRENT_RATIO_STRONG: f64 = 1.5;
pub const CURRENT_RATIO_ADEQUATE: f64 = 1.0;
pub const DIVIDENDS_PER_POINT: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Dividend,
    NetIncome,
    CurrentRatio,
    PriceToBook,
    PeRatio,
    ProfitMargin,
}

impl Screen {
    /// Run order used by the suite.
    pub const ALL: [Screen; 6] = [
        Screen::Dividend,
        Screen::NetIncome,
        Screen::CurrentRatio,
        Screen::PriceToBook,
        Screen::PeRatio,
        Screen::ProfitMargin,
    ];
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Dividend => "dividend",
            Screen::NetIncome => "net_income",
            Screen::CurrentRatio => "current_ratio",
            Screen::PriceToBook => "price_to_book",
            Screen::PeRatio => "pe_ratio",
            Screen::ProfitMargin => "profit_margin",
        };
        f.write_str(name)
    }
}

/// One point per four dividend payments.
///
/// Monthly payers get three times the credit of quarterly payers with the
/// same history; the count is not normalised by payment frequency.
pub fn dividend_points(count: u32) -> Score {
    Score::from(count / DIVIDENDS_PER_POINT)
}

/// Number of reports when every report shows positive net income, `None`
/// when any report is missing net income or the record is empty.
pub fn net_income_points(record: &FinancialRecord) -> Option<Score> {
    if record.reports.is_empty() {
        return None;
    }
    let mut all_positive = true;
    for report in &record.reports {
        let income = report.net_income?;
        if income <= 0.0 {
            all_positive = false;
        }
    }
    Some(if all_positive {
        record.reports.len() as Score
    } else {
        0
    })
}

/// Current assets over current debt, when both are known and debt is non-zero.
pub fn current_ratio(report: &FinancialReport) -> Option<f64> {
    match (report.current_assets, report.current_debt) {
        (Some(assets), Some(debt)) if debt != 0.0 => Some(assets / debt),
        _ => None,
    }
}

pub fn current_ratio_points(report: &FinancialReport) -> Option<Score> {
    if let Some(ratio) = current_ratio(report) {
        let points = if ratio >= CURRENT_RATIO_STRONG {
            2
        } else if ratio >= CURRENT_RATIO_ADEQUATE {
            1
        } else {
            0
        };
        return Some(points);
    }

    // No short-term obligations.
    let no_debt = report.current_debt.is_none_or(|debt| debt == 0.0);
    match report.current_assets {
        Some(assets) if no_debt && assets > 0.0 => Some(1),
        _ => None,
    }
}

pub fn price_to_book_points(price_to_book: f64) -> Score {
    if price_to_book > 0.0 && price_to_book <= PRICE_TO_BOOK_MAX {
        1
    } else {
        0
    }
}

/// Trailing P/E, defined only for positive earnings and a positive close.
pub fn pe_ratio(close: f64, ttm_eps: f64) -> Option<f64> {
    (ttm_eps > 0.0 && close > 0.0).then(|| close / ttm_eps)
}

pub fn pe_ratio_points(pe: f64) -> Score {
    Score::from(pe <= PE_RATIO_FAIR) + Score::from(pe <= PE_RATIO_CHEAP)
}

pub fn profit_margin_points(margin: f64) -> Score {
    Score::from(margin > PROFIT_MARGIN_GOOD) + Score::from(margin > PROFIT_MARGIN_GREAT)
}

pub fn dividend_screen(dividends: &DividendSet, mut scores: ScoreStore) -> ScoreStore {
    for (symbol, record) in dividends {
        scores.award(symbol, dividend_points(record.count));
    }
    scores
}

pub fn net_income_screen(financials: &FinancialSet, mut scores: ScoreStore) -> ScoreStore {
    for (symbol, record) in financials {
        if let Some(points) = net_income_points(record) {
            scores.award(symbol, points);
        }
    }
    scores
}

pub fn current_ratio_screen(financials: &FinancialSet, mut scores: ScoreStore) -> ScoreStore {
    for (symbol, record) in financials {
        if let Some(points) = record.latest().and_then(current_ratio_points) {
            scores.award(symbol, points);
        }
    }
    scores
}

pub fn price_to_book_screen(stats: &StatsSet, mut scores: ScoreStore) -> ScoreStore {
    for (symbol, s) in stats {
        if let Some(ptb) = s.price_to_book {
            scores.award(symbol, price_to_book_points(ptb));
        }
    }
    scores
}

pub fn pe_ratio_screen(stats: &StatsSet, close: &CloseSet, mut scores: ScoreStore) -> ScoreStore {
    for (symbol, s) in stats {
        let price = close.get(symbol).and_then(|c| c.close);
        let pe = match (price, s.ttm_eps) {
            (Some(price), Some(eps)) => pe_ratio(price, eps),
            _ => None,
        };
        if let Some(pe) = pe {
            scores.award(symbol, pe_ratio_points(pe));
        }
    }
    scores
}

pub fn profit_margin_screen(stats: &StatsSet, mut scores: ScoreStore) -> ScoreStore {
    for (symbol, s) in stats {
        if let Some(margin) = s.profit_margin {
            scores.award(symbol, profit_margin_points(margin));
        }
    }
    scores
}
