//! CLI definition and dispatch.

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::csv_adapter::{read_symbols, CsvReportAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_adapter::JsonAdapter;
use crate::domain::batch::MAX_BATCH_SIZE;
use crate::domain::config_validation::validate_config;
use crate::domain::error::StockscoreError;
use crate::domain::score::RankedScore;
use crate::domain::suite::{run_suite, SuiteInputs, SuiteSummary};
use crate::domain::universe::{parse_symbols, setup};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "stockscore", about = "Fundamental value scoring for stock symbols")]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch fundamentals, run every screen and print the ranking
    Score {
        #[arg(short, long)]
        config: PathBuf,
        /// Only report the N highest scores
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        top: Option<usize>,
        /// Also write the ranking as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Print the request batches for the configured universe
    Batches {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Print the resolved symbol universe
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Everything the scoring pipeline needs besides the data port.
#[derive(Debug, Clone, Default)]
pub struct ScoreOptions {
    pub symbols: Option<Vec<String>>,
    pub batch_size: usize,
    pub top: Option<usize>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ScoreOutput {
    pub ranking: Vec<RankedScore>,
    pub summary: SuiteSummary,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Score {
            config,
            top,
            output,
            batch_size,
        } => run_score(&config, top, output, batch_size),
        Command::Batches { config, batch_size } => run_batches(&config, batch_size),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| fail(&e))
}

/// Load and validate, reporting failures as an exit code.
fn load_valid_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    info!("loading config from {}", path.display());
    let config = load_config(path)?;
    validate_config(&config).map_err(|e| fail(&e))?;
    Ok(config)
}

fn fail(err: &StockscoreError) -> ExitCode {
    error!("{err}");
    err.into()
}

pub fn build_data_port(config: &dyn ConfigPort) -> Result<Box<dyn DataPort>, StockscoreError> {
    let kind = config
        .get_non_empty("provider", "kind")
        .unwrap_or_else(|| "iex".to_string());

    match kind.as_str() {
        "json" => Ok(Box::new(JsonAdapter::from_config(config)?)),
        #[cfg(feature = "iex")]
        "iex" => Ok(Box::new(
            crate::adapters::iex_adapter::IexAdapter::from_config(config)?,
        )),
        #[cfg(not(feature = "iex"))]
        "iex" => Err(StockscoreError::ConfigInvalid {
            section: "provider".into(),
            key: "kind".into(),
            reason: "iex feature is required for the iex provider".into(),
        }),
        other => Err(StockscoreError::ConfigInvalid {
            section: "provider".into(),
            key: "kind".into(),
            reason: format!("unknown provider kind '{}'", other),
        }),
    }
}

/// Configured universe: `[universe] symbols` wins over `symbols_file`.
/// `None` means the provider's own symbol list should be used.
pub fn resolve_symbols(config: &dyn ConfigPort) -> Result<Option<Vec<String>>, StockscoreError> {
    if let Some(list) = config.get_non_empty("universe", "symbols") {
        return Ok(Some(parse_symbols(&list)?));
    }
    if let Some(file) = config.get_non_empty("universe", "symbols_file") {
        return Ok(Some(read_symbols(file)?));
    }
    Ok(None)
}

pub fn resolve_batch_size(batch_override: Option<usize>, config: &dyn ConfigPort) -> usize {
    batch_override
        .unwrap_or_else(|| {
            config
                .get_int("provider", "batch_size", MAX_BATCH_SIZE as i64)
                .max(1) as usize
        })
        .clamp(1, MAX_BATCH_SIZE)
}

pub fn resolve_top(top_override: Option<usize>, config: &dyn ConfigPort) -> Option<usize> {
    top_override.or_else(|| {
        let top = config.get_int("report", "top", 0);
        (top > 0).then_some(top as usize)
    })
}

pub fn build_score_options(
    config: &dyn ConfigPort,
    top: Option<usize>,
    output: Option<PathBuf>,
    batch_size: Option<usize>,
) -> Result<ScoreOptions, StockscoreError> {
    Ok(ScoreOptions {
        symbols: resolve_symbols(config)?,
        batch_size: resolve_batch_size(batch_size, config),
        top: resolve_top(top, config),
        output: output.or_else(|| config.get_non_empty("report", "output").map(PathBuf::from)),
    })
}

/// Universe setup, every screen, ranking, and the optional CSV report.
pub fn run_score_pipeline(
    data_port: &dyn DataPort,
    options: &ScoreOptions,
) -> Result<ScoreOutput, StockscoreError> {
    let run = setup(data_port, options.symbols.clone(), options.batch_size)?;

    let (scores, summary) = run_suite(data_port, &run.batches, run.scores, SuiteInputs::default());
    info!(
        symbols = scores.len(),
        points = summary.total_points(),
        "scoring complete"
    );

    let ranking = scores.top(options.top);

    if let Some(path) = &options.output {
        CsvReportAdapter.write(&ranking, &path.to_string_lossy())?;
        info!("ranking written to {}", path.display());
    }

    Ok(ScoreOutput { ranking, summary })
}

fn run_score(
    config_path: &Path,
    top: Option<usize>,
    output: Option<PathBuf>,
    batch_size: Option<usize>,
) -> ExitCode {
    let config = match load_valid_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let result = build_score_options(&config, top, output, batch_size).and_then(|options| {
        let data_port = build_data_port(&config)?;
        run_score_pipeline(data_port.as_ref(), &options)
    });

    match result {
        Ok(output) => {
            for row in &output.ranking {
                println!("{:>4}  {:<8} {}", row.rank, row.symbol, row.score);
            }
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_batches(config_path: &Path, batch_size: Option<usize>) -> ExitCode {
    let config = match load_valid_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let result = resolve_symbols(&config).and_then(|symbols| {
        let data_port = build_data_port(&config)?;
        setup(
            data_port.as_ref(),
            symbols,
            resolve_batch_size(batch_size, &config),
        )
    });

    match result {
        Ok(run) => {
            for batch in &run.batches {
                println!("{}\t{}", batch.index, batch.joined());
            }
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_list_symbols(config_path: &Path) -> ExitCode {
    let config = match load_valid_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let result = resolve_symbols(&config).and_then(|symbols| {
        let data_port = build_data_port(&config)?;
        setup(data_port.as_ref(), symbols, MAX_BATCH_SIZE)
    });

    match result {
        Ok(run) => {
            for symbol in &run.universe.symbols {
                println!("{}", symbol);
            }
            info!("{} symbols", run.universe.count());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    match load_valid_config(config_path) {
        Ok(_) => {
            info!("configuration is valid");
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}
