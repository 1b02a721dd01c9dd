//! The replay loop: every row, pass after pass, until the target is reached.

use crate::errors::BenchError;
use crate::reporter::Reporter;
use crate::row::Row;
use crate::view::{Emission, ViewFn, view_map};
use std::io::Write;
use std::time::{Duration, Instant};

/// Row count the sample is scaled up to.
pub const DEFAULT_TARGET: u64 = 12_339_702;

/// Number of full passes needed to reach `target` rows: `ceil(target / dataset_size)`.
///
/// # Errors
/// `EmptyDataset` when there are no rows to replay.
pub fn repeat_factor(target: u64, dataset_size: usize) -> Result<u64, BenchError> {
    if dataset_size == 0 {
        return Err(BenchError::EmptyDataset);
    }
    Ok(target.div_ceil(dataset_size as u64))
}

/// Accumulates emissions in the order they were produced.
#[derive(Debug, Default)]
pub struct Collector {
    rows: Vec<Emission>,
}

impl Collector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, emission: Emission) {
        self.rows.push(emission);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Emission> {
        self.rows.iter()
    }
}

/// Applies `view` to every row, `repeat` times, pass index outer.
///
/// # Errors
/// The first view error aborts the loop and is returned as-is.
pub fn run_passes(
    rows: &[Row],
    repeat: u64,
    view: ViewFn,
    collector: &mut Collector,
) -> Result<(), BenchError> {
    for pass in 0..repeat {
        for (index, row) in rows.iter().enumerate() {
            match view(row) {
                Ok(Some(emission)) => collector.emit(emission),
                Ok(None) => {}
                Err(e) => {
                    log::error!("view map failed at pass {pass}, row {index}: {e}");
                    return Err(e);
                }
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub rows: usize,
    pub repeat: u64,
    pub emitted: usize,
    pub elapsed: Duration,
}

impl RunReport {
    #[must_use]
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    /// Throughput; `None` when the run took less than a microsecond.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rows_per_ms(&self) -> Option<f64> {
        let ms = self.elapsed.as_secs_f64() * 1000.0;
        (ms >= 0.001).then(|| self.emitted as f64 / ms)
    }
}

/// A loaded dataset, the target it is scaled to and the view to run over it.
pub struct Benchmark<'a> {
    rows: &'a [Row],
    target: u64,
    view: ViewFn,
}

impl<'a> Benchmark<'a> {
    #[must_use]
    pub fn new(rows: &'a [Row], target: u64) -> Self {
        Self { rows, target, view: view_map }
    }

    #[must_use]
    pub fn with_view(mut self, view: ViewFn) -> Self {
        self.view = view;
        self
    }

    /// # Errors
    /// `EmptyDataset` when there are no rows.
    pub fn repeat_factor(&self) -> Result<u64, BenchError> {
        repeat_factor(self.target, self.rows.len())
    }

    /// Runs the loop, timing only the passes themselves.
    ///
    /// # Errors
    /// Propagates view failures, and I/O errors from the reporter sink.
    pub fn run<W: Write>(
        &self,
        reporter: &mut Reporter<W>,
    ) -> Result<(RunReport, Collector), BenchError> {
        let repeat = self.repeat_factor()?;
        reporter.start(self.rows.len(), repeat).map_err(|e| BenchError::Io(e.to_string()))?;
        log::info!(
            "benchmark start: {} rows x {} passes, target {}",
            self.rows.len(),
            repeat,
            self.target
        );

        let mut collector = Collector::new();
        let start = Instant::now();
        run_passes(self.rows, repeat, self.view, &mut collector)?;
        let elapsed = start.elapsed();

        let report =
            RunReport { rows: self.rows.len(), repeat, emitted: collector.len(), elapsed };
        reporter.finish(&report).map_err(|e| BenchError::Io(e.to_string()))?;
        log::info!("benchmark finished: {} emissions in {:?}", report.emitted, elapsed);
        Ok((report, collector))
    }
}
