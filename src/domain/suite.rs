//! Screen suite runner.
//!
//! Runs every screen in [`Screen::ALL`] order over one score store. Datasets
//! the caller supplies in [`SuiteInputs`] are used as-is; anything absent is
//! fetched through the data port the first time a screen needs it and then
//! shared by later screens in the same run.

use crate::domain::batch::Batch;
use crate::domain::fetch::{fetch_close, fetch_dividends, fetch_financials, fetch_stats};
use crate::domain::fundamentals::{CloseSet, DividendSet, FinancialSet, StatsSet};
use crate::domain::score::{Score, ScoreStore};
use crate::domain::screen::{self, Screen};
use crate::ports::data_port::DataPort;
use tracing::info;

/// Pre-fetched datasets; `None` means "fetch on demand".
#[derive(Debug, Clone, Default)]
pub struct SuiteInputs {
    pub dividends: Option<DividendSet>,
    pub financials: Option<FinancialSet>,
    pub stats: Option<StatsSet>,
    pub close: Option<CloseSet>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenOutcome {
    pub screen: Screen,
    pub symbols_awarded: usize,
    pub points_awarded: Score,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    pub outcomes: Vec<ScreenOutcome>,
}

impl SuiteSummary {
    pub fn total_points(&self) -> Score {
        self.outcomes.iter().map(|o| o.points_awarded).sum()
    }
}

/// Where a screen gets its data: supplied inputs first, the port otherwise.
pub struct ScreenContext<'a> {
    port: &'a dyn DataPort,
    batches: &'a [Batch],
    inputs: SuiteInputs,
}

impl<'a> ScreenContext<'a> {
    pub fn new(port: &'a dyn DataPort, batches: &'a [Batch], inputs: SuiteInputs) -> Self {
        Self {
            port,
            batches,
            inputs,
        }
    }

    pub fn dividends(&mut self) -> &DividendSet {
        let (port, batches) = (self.port, self.batches);
        self.inputs
            .dividends
            .get_or_insert_with(|| fetch_dividends(port, batches))
    }

    pub fn financials(&mut self) -> &FinancialSet {
        let (port, batches) = (self.port, self.batches);
        self.inputs
            .financials
            .get_or_insert_with(|| fetch_financials(port, batches))
    }

    pub fn stats(&mut self) -> &StatsSet {
        let (port, batches) = (self.port, self.batches);
        self.inputs
            .stats
            .get_or_insert_with(|| fetch_stats(port, batches))
    }

    pub fn stats_and_close(&mut self) -> (&StatsSet, &CloseSet) {
        let (port, batches) = (self.port, self.batches);
        let inputs = &mut self.inputs;
        let stats = inputs.stats.get_or_insert_with(|| fetch_stats(port, batches));
        let close = inputs.close.get_or_insert_with(|| fetch_close(port, batches));
        (stats, close)
    }

    /// Apply one screen, fetching its data if it has not been supplied.
    pub fn apply(&mut self, screen: Screen, scores: ScoreStore) -> ScoreStore {
        match screen {
            Screen::Dividend => screen::dividend_screen(self.dividends(), scores),
            Screen::NetIncome => screen::net_income_screen(self.financials(), scores),
            Screen::CurrentRatio => screen::current_ratio_screen(self.financials(), scores),
            Screen::PriceToBook => screen::price_to_book_screen(self.stats(), scores),
            Screen::PeRatio => {
                let (stats, close) = self.stats_and_close();
                screen::pe_ratio_screen(stats, close, scores)
            }
            Screen::ProfitMargin => screen::profit_margin_screen(self.stats(), scores),
        }
    }

    pub fn into_inputs(self) -> SuiteInputs {
        self.inputs
    }
}

fn outcome(screen: Screen, before: &ScoreStore, after: &ScoreStore) -> ScreenOutcome {
    let mut symbols_awarded = 0;
    let mut points_awarded = 0;
    for ((_, old), (_, new)) in before.iter().zip(after.iter()) {
        if new != old {
            symbols_awarded += 1;
            points_awarded += new - old;
        }
    }
    ScreenOutcome {
        screen,
        symbols_awarded,
        points_awarded,
    }
}

/// Run all screens in order, threading `scores` through each one.
pub fn run_suite(
    port: &dyn DataPort,
    batches: &[Batch],
    scores: ScoreStore,
    inputs: SuiteInputs,
) -> (ScoreStore, SuiteSummary) {
    let mut ctx = ScreenContext::new(port, batches, inputs);
    let mut scores = scores;
    let mut summary = SuiteSummary::default();

    for screen in Screen::ALL {
        let before = scores.clone();
        scores = ctx.apply(screen, scores);
        let result = outcome(screen, &before, &scores);
        info!(
            screen = %screen,
            symbols = result.symbols_awarded,
            points = result.points_awarded,
            "screen applied"
        );
        summary.outcomes.push(result);
    }

    (scores, summary)
}
