use crate::driver::RunReport;
use crate::logger::METRICS_TARGET;
use std::io::{self, Write};

/// Writes the two human-readable benchmark lines and a metrics log record.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// # Errors
    /// Returns an error if the sink cannot be written.
    pub fn start(&mut self, rows: usize, repeat: u64) -> io::Result<()> {
        writeln!(self.out, "Processing {rows} rows {repeat} times each")?;
        self.out.flush()
    }

    /// # Errors
    /// Returns an error if the sink cannot be written.
    pub fn finish(&mut self, report: &RunReport) -> io::Result<()> {
        writeln!(self.out, "Emitted {} rows in {}ms", report.emitted, report.elapsed_ms())?;
        match report.rows_per_ms() {
            Some(rate) => log::info!(
                target: METRICS_TARGET,
                "rows={} repeat={} emitted={} elapsed_ms={} rows_per_ms={:.1}",
                report.rows, report.repeat, report.emitted, report.elapsed_ms(), rate
            ),
            None => log::info!(
                target: METRICS_TARGET,
                "rows={} repeat={} emitted={} elapsed_ms=0",
                report.rows, report.repeat, report.emitted
            ),
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
