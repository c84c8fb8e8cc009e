//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::adapters::console_report::ConsoleReport;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_report_adapter::{SvgReportAdapter, DEFAULT_CHART_PATH};
use crate::domain::acquisition::fetch_aligned;
use crate::domain::config::{parse_symbols, PairsConfig, DEFAULT_ALPHA};
use crate::domain::config_validation::{check_alpha, parse_date, validate_all_with_alpha};
use crate::domain::error::PairsError;
use crate::domain::price::Alignment;
use crate::domain::report::BacktestReport;
use crate::domain::simulation::run_simulation;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Parser, Debug)]
#[command(name = "pairtrader", about = "Two-instrument pairs trading backtester")]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest and write the comparison chart
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Directory holding <SYMBOL>.csv price files (file names match case-insensitively)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Chart output path (.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the exit threshold; the INI alpha is then ignored
        #[arg(long)]
        alpha: Option<f64>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the available data range for both symbols
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Logs go to stderr so stdout carries only the report. `RUST_LOG` wins
/// over `verbose` when set.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Backtest {
            config,
            data_dir,
            output,
            alpha,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config, data_dir.as_deref(), output.as_deref(), alpha)
            } else {
                run_backtest(&config, data_dir.as_deref(), output.as_deref(), alpha)
            }
        }
        Command::Info { config, data_dir } => run_info(&config, data_dir.as_deref()),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

/// Parse and validate the INI file. With `alpha_override` set, the file's
/// own `alpha` is not validated.
pub fn load_config(
    path: &Path,
    alpha_override: Option<f64>,
) -> Result<FileConfigAdapter, PairsError> {
    info!("loading config from {}", path.display());
    let adapter = FileConfigAdapter::from_file(path)?;
    validate_all_with_alpha(&adapter, alpha_override)?;
    Ok(adapter)
}

pub fn resolve_symbols(config: &dyn ConfigPort) -> Result<(String, String), PairsError> {
    if let Some(list) = config.get_string("backtest", "symbols") {
        return parse_symbols(&list).map_err(|e| PairsError::ConfigInvalid {
            section: "backtest".into(),
            key: "symbols".into(),
            reason: e.to_string(),
        });
    }

    let get = |key: &str| {
        config
            .get_string("backtest", key)
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PairsError::ConfigMissing {
                section: "backtest".into(),
                key: key.into(),
            })
    };
    Ok((get("long_symbol")?, get("inverse_symbol")?))
}

pub fn build_pairs_config(
    config: &dyn ConfigPort,
    alpha_override: Option<f64>,
) -> Result<PairsConfig, PairsError> {
    let (long_symbol, inverse_symbol) = resolve_symbols(config)?;
    let start_date = parse_date(
        config.get_string("backtest", "start_date").as_deref(),
        "start_date",
    )?;
    let end_date = parse_date(
        config.get_string("backtest", "end_date").as_deref(),
        "end_date",
    )?;

    let alpha = match alpha_override {
        Some(a) => a,
        None => config.get_double("backtest", "alpha", DEFAULT_ALPHA),
    };
    check_alpha(Some(alpha))?;

    Ok(PairsConfig {
        long_symbol,
        inverse_symbol,
        start_date,
        end_date,
        alpha,
    })
}

pub fn resolve_alignment(config: &dyn ConfigPort) -> Result<Alignment, PairsError> {
    match config.get_string("data", "alignment") {
        None => Ok(Alignment::default()),
        Some(s) => s.parse().map_err(|reason| PairsError::ConfigInvalid {
            section: "data".into(),
            key: "alignment".into(),
            reason,
        }),
    }
}

pub fn resolve_data_dir(dir_override: Option<&Path>, config: &dyn ConfigPort) -> PathBuf {
    dir_override
        .map(Path::to_path_buf)
        .or_else(|| config.get_string("data", "dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

pub fn resolve_chart_path(output_override: Option<&Path>, config: &dyn ConfigPort) -> PathBuf {
    output_override
        .map(Path::to_path_buf)
        .or_else(|| config.get_string("report", "chart_path").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_PATH))
}

/// Everything a backtest run uses, after command-line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub pairs: PairsConfig,
    pub alignment: Alignment,
    pub data_dir: PathBuf,
    pub chart_path: PathBuf,
}

pub fn resolve_run_settings(
    config: &dyn ConfigPort,
    data_dir: Option<&Path>,
    output: Option<&Path>,
    alpha: Option<f64>,
) -> Result<RunSettings, PairsError> {
    Ok(RunSettings {
        pairs: build_pairs_config(config, alpha)?,
        alignment: resolve_alignment(config)?,
        data_dir: resolve_data_dir(data_dir, config),
        chart_path: resolve_chart_path(output, config),
    })
}

pub fn format_run_settings(settings: &RunSettings) -> String {
    let pairs = &settings.pairs;
    format!(
        "long symbol:    {}\n\
         inverse symbol: {}\n\
         date range:     {} to {}\n\
         alpha:          {}\n\
         data dir:       {}\n\
         alignment:      {}\n\
         chart:          {}\n",
        pairs.long_symbol,
        pairs.inverse_symbol,
        pairs.start_date,
        pairs.end_date,
        pairs.alpha,
        settings.data_dir.display(),
        settings.alignment,
        settings.chart_path.display()
    )
}

/// Acquire, simulate, aggregate, then hand the result to every reporter.
pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    pairs: &PairsConfig,
    alignment: Alignment,
    reporters: &[&dyn ReportPort],
) -> Result<BacktestReport, PairsError> {
    info!(
        "backtesting {} / {} from {} to {}",
        pairs.long_symbol, pairs.inverse_symbol, pairs.start_date, pairs.end_date
    );

    let frame = fetch_aligned(data_port, pairs, alignment)?;
    let outcome = run_simulation(&frame, pairs);
    let report = BacktestReport::build(pairs, &frame, outcome);

    if report.statistics.is_degenerate() {
        warn!("no trades closed; statistics are zero");
    }

    for reporter in reporters {
        reporter.write(&report)?;
    }
    Ok(report)
}

fn run_backtest(
    config_path: &Path,
    data_dir: Option<&Path>,
    output: Option<&Path>,
    alpha: Option<f64>,
) -> Result<(), PairsError> {
    let adapter = load_config(config_path, alpha)?;
    let settings = resolve_run_settings(&adapter, data_dir, output, alpha)?;

    let data_port = CsvAdapter::new(settings.data_dir);
    let console = ConsoleReport::stdout();
    let chart = SvgReportAdapter::new(settings.chart_path);

    run_backtest_pipeline(
        &data_port,
        &settings.pairs,
        settings.alignment,
        &[&console, &chart],
    )?;
    Ok(())
}

fn run_dry_run(
    config_path: &Path,
    data_dir: Option<&Path>,
    output: Option<&Path>,
    alpha: Option<f64>,
) -> Result<(), PairsError> {
    let adapter = load_config(config_path, alpha)?;
    let settings = resolve_run_settings(&adapter, data_dir, output, alpha)?;

    print!("{}", format_run_settings(&settings));
    info!("dry run complete: configuration is valid");
    Ok(())
}

fn run_info(config_path: &Path, data_dir: Option<&Path>) -> Result<(), PairsError> {
    let adapter = load_config(config_path, None)?;
    let (long, inverse) = resolve_symbols(&adapter)?;
    let data_port = CsvAdapter::new(resolve_data_dir(data_dir, &adapter));

    for symbol in [&long, &inverse] {
        match data_port.get_data_range(symbol)? {
            Some((first, last, rows)) => {
                println!("{}: {} rows, {} to {}", symbol, rows, first, last)
            }
            None => println!("{}: no data", symbol),
        }
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), PairsError> {
    let adapter = load_config(config_path, None)?;
    let pairs = build_pairs_config(&adapter, None)?;
    resolve_alignment(&adapter)?;
    info!(
        "configuration is valid: {} / {}, alpha {}",
        pairs.long_symbol, pairs.inverse_symbol, pairs.alpha
    );
    Ok(())
}
