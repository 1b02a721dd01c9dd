//! Parser for plain-text benchmark logs, flattened into one JSON record per stage.
//!
//! A log is a sequence of benchmarks. Each starts with an info line
//! `timestamp - commit - host[ - zig]` followed by stage lines such as
//! `[ load ] rows: 120000 / s`. Lines starting with `#` are comments.

use crate::errors::BenchError;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub timestamp: String,
    pub commit: String,
    pub host: String,
    pub zig: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub index: usize,
    pub stage_name: String,
    pub metric_name: String,
    pub rate: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult {
    pub info: Info,
    pub stages: Vec<Stage>,
}

/// One stage of one benchmark, with the benchmark's info repeated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageRecord {
    pub timestamp: String,
    pub commit: String,
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zig: Option<String>,
    pub stage_index: usize,
    pub stage_name: String,
    pub metric_name: String,
    pub rate: u64,
}

impl BenchmarkResult {
    #[must_use]
    pub fn flattened(&self) -> Vec<StageRecord> {
        self.stages
            .iter()
            .map(|stage| StageRecord {
                timestamp: self.info.timestamp.clone(),
                commit: self.info.commit.clone(),
                host: self.info.host.clone(),
                zig: self.info.zig.clone(),
                stage_index: stage.index,
                stage_name: stage.stage_name.clone(),
                metric_name: stage.metric_name.clone(),
                rate: stage.rate,
            })
            .collect()
    }
}

pub struct BenchLogParser {
    stage: Regex,
    separator: Regex,
}

impl BenchLogParser {
    /// # Errors
    /// Returns an error if the line patterns fail to compile.
    pub fn new() -> Result<Self, BenchError> {
        Ok(Self {
            stage: Regex::new(r"^\[\s*(\S+)\s*\]\s*(.+?):\s*(\d+)\s*/\s*s$")?,
            separator: Regex::new(r"\s+-\s+")?,
        })
    }

    /// Parses a whole log. Blank lines are ignored.
    ///
    /// # Errors
    /// `BenchLog` (with the 1-based line number) for a stage before any info line, an
    /// info line without 3 or 4 fields, or a rate that does not fit in 64 bits.
    pub fn parse<I, S>(&self, lines: I) -> Result<Vec<BenchmarkResult>, BenchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut results = Vec::new();
        let mut current: Option<BenchmarkResult> = None;
        for (i, raw) in lines.into_iter().enumerate() {
            let line_no = i + 1;
            let line = raw.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(caps) = self.stage.captures(line) {
                let Some(bench) = current.as_mut() else {
                    return Err(BenchError::BenchLog {
                        line: line_no,
                        message: "stage found before benchmark info".to_string(),
                    });
                };
                let rate = caps[3].parse::<u64>().map_err(|e| BenchError::BenchLog {
                    line: line_no,
                    message: format!("rate {}: {e}", &caps[3]),
                })?;
                bench.stages.push(Stage {
                    index: bench.stages.len(),
                    stage_name: caps[1].to_string(),
                    metric_name: caps[2].to_string(),
                    rate,
                });
                continue;
            }
            let info = self.parse_info(line).ok_or_else(|| BenchError::BenchLog {
                line: line_no,
                message: format!("invalid benchmark info line: {line}"),
            })?;
            if let Some(done) = current.replace(BenchmarkResult { info, stages: Vec::new() }) {
                results.push(done);
            }
        }
        results.extend(current);
        Ok(results)
    }

    fn parse_info(&self, line: &str) -> Option<Info> {
        let parts: Vec<&str> = self.separator.split(line).collect();
        match parts.as_slice() {
            [timestamp, commit, host] => Some(Info {
                timestamp: (*timestamp).to_string(),
                commit: (*commit).to_string(),
                host: (*host).to_string(),
                zig: None,
            }),
            [timestamp, commit, host, zig] => Some(Info {
                timestamp: (*timestamp).to_string(),
                commit: (*commit).to_string(),
                host: (*host).to_string(),
                zig: Some((*zig).to_string()),
            }),
            _ => None,
        }
    }
}

/// Parses a log and flattens every benchmark into stage records, in input order.
///
/// # Errors
/// See [`BenchLogParser::parse`].
pub fn log_to_records<I, S>(lines: I) -> Result<Vec<StageRecord>, BenchError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parser = BenchLogParser::new()?;
    Ok(parser.parse(lines)?.iter().flat_map(BenchmarkResult::flattened).collect())
}
