//! Parse road records from delimited text.
//!
//! One record per line: `townA;townB;distance;roadName`. Fields are trimmed.
//! Malformed lines are skipped and reported unless the loader is strict.

use crate::config::LoaderConfig;
use crate::error::{LoadError, RecordError};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// One parsed road: a directed connection from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadRecord {
    pub from: String,
    pub to: String,
    pub distance: u32,
    pub road: String,
}

/// A line the loader rejected, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: RecordError,
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<RoadRecord>,
    pub skipped: Vec<SkippedLine>,
}

/// Parse a single record line.
pub fn parse_record(line: &str, delimiter: char) -> Result<RoadRecord, RecordError> {
    let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
    let [from, to, distance, road] = fields.as_slice() else {
        return Err(RecordError::FieldCount(fields.len()));
    };

    if from.is_empty() || to.is_empty() {
        return Err(RecordError::EmptyTown);
    }
    if road.is_empty() {
        return Err(RecordError::EmptyRoad);
    }
    let distance = distance
        .parse::<u32>()
        .map_err(|_| RecordError::InvalidDistance((*distance).to_string()))?;

    Ok(RoadRecord {
        from: (*from).to_string(),
        to: (*to).to_string(),
        distance,
        road: (*road).to_string(),
    })
}

/// Parse every line of `text`. Blank lines are ignored.
pub fn parse_records(text: &str, config: &LoaderConfig) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        match parse_record(line, config.delimiter) {
            Ok(record) => report.records.push(record),
            Err(reason) if config.strict => {
                return Err(LoadError::Malformed {
                    line: line_no,
                    source: reason,
                });
            }
            Err(reason) => {
                tracing::debug!("skipping line {}: {}", line_no, reason);
                report.skipped.push(SkippedLine {
                    line: line_no,
                    reason,
                });
            }
        }
    }

    Ok(report)
}

/// Read and parse a road file from disk.
pub fn load_file(path: &Path, config: &LoaderConfig) -> Result<LoadReport> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read road file {}", path.display()))?;
    let report = parse_records(&text, config)
        .with_context(|| format!("malformed road file {}", path.display()))?;
    tracing::info!(
        "loaded {} road(s) from {} ({} line(s) skipped)",
        report.records.len(),
        path.display(),
        report.skipped.len()
    );
    Ok(report)
}
