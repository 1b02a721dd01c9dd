pub mod benchlog;
pub mod config;
pub mod driver;
pub mod errors;
pub mod loader;
pub mod logger;
pub mod reporter;
pub mod row;
pub mod view;

use crate::config::BenchConfig;
use crate::driver::{Benchmark, RunReport};
use crate::errors::BenchError;
use crate::reporter::Reporter;
use std::io::Write;

/// Initializes logging from the resolved config.
///
/// A log4rs YAML file wins over a log directory; with neither, no logger is installed
/// and log records are discarded.
///
/// # Errors
/// Returns an error if the logger cannot be set up.
pub fn init_logging(cfg: &BenchConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = &cfg.log_config {
        logger::init_path(path)?;
    } else if let Some(dir) = &cfg.log_dir {
        logger::configure_logging(dir, cfg.log_level.as_deref(), cfg.log_retention)?;
    }
    Ok(())
}

/// Loads the configured dataset and runs the benchmark, reporting to `out`.
///
/// The emissions are dropped once the run is measured.
///
/// # Errors
/// Any load, view or reporting failure.
pub fn run<W: Write>(cfg: &BenchConfig, out: W) -> Result<RunReport, BenchError> {
    let rows = loader::load_rows(cfg.input_path())?;
    let mut reporter = Reporter::new(out);
    let (report, _emissions) = Benchmark::new(&rows, cfg.target()).run(&mut reporter)?;
    Ok(report)
}
