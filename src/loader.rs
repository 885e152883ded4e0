//! Tabular (CSV) intake.
//!
//! Device exports arrive as two banner lines, a header row, then
//! `time,value` rows. Timestamps are either a plain number of seconds or a
//! clock string (`H:MM:SS.fff`, possibly quoted, possibly missing the hours
//! component); values are coerced to numbers and rows that fail coercion
//! are dropped. Output timestamps are normalized to elapsed seconds from
//! the first surviving row.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use chrono::Timelike;

use crate::error::{BiosigError, Result};
use crate::types::{Sample, TimeSeries};

/// Intake options.
#[derive(Debug, Clone, Copy)]
pub struct LoaderOptions {
    /// Banner lines to discard before the header row.
    pub skip_rows: usize,
    /// Whether a header row precedes the data.
    pub has_header: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            skip_rows: 2,
            has_header: true,
        }
    }
}

/// Load a recording from a CSV file with default options.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeries> {
    load_csv_with(path, &LoaderOptions::default())
}

/// Load a recording from a CSV file.
pub fn load_csv_with<P: AsRef<Path>>(path: P, options: &LoaderOptions) -> Result<TimeSeries> {
    let file = File::open(path.as_ref())?;
    parse_rows(file, options)
}

/// Parse `time,value` rows from a reader into a validated series.
///
/// # Errors
/// `UnsupportedFormat` when rows cannot be interpreted as time+value
/// pairs or nothing usable remains; `DegenerateTiming` when surviving
/// timestamps are not strictly increasing.
pub fn parse_rows<R: Read>(input: R, options: &LoaderOptions) -> Result<TimeSeries> {
    let mut buf = BufReader::new(input);

    for _ in 0..options.skip_rows {
        let mut line = String::new();
        if buf.read_line(&mut line)? == 0 {
            break;
        }
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_header)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(buf);

    let mut raw: Vec<(f64, f64)> = Vec::new();
    let mut dropped = 0usize;

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() < 2 {
            return Err(BiosigError::UnsupportedFormat(format!(
                "row {} has {} field(s), expected time and value",
                row + 1,
                record.len()
            )));
        }

        let elapsed = parse_elapsed(&record[0]).ok_or_else(|| {
            BiosigError::UnsupportedFormat(format!(
                "row {} has unparseable timestamp '{}'",
                row + 1,
                &record[0]
            ))
        })?;

        // Values that do not coerce to a finite number are dropped, the
        // rest of the series survives.
        match record[1].parse::<f64>() {
            Ok(value) if value.is_finite() => raw.push((elapsed, value)),
            _ => {
                dropped += 1;
                log::debug!("Dropping row {} with non-numeric value '{}'", row + 1, &record[1]);
            }
        }
    }

    if raw.is_empty() {
        return Err(BiosigError::UnsupportedFormat(
            "no usable time/value rows in input".to_string(),
        ));
    }

    if dropped > 0 {
        log::info!("Dropped {} row(s) with non-numeric values", dropped);
    }
    log::info!("Loaded {} samples", raw.len());

    let start = raw[0].0;
    let samples = raw
        .into_iter()
        .map(|(t, v)| Sample::new(t - start, v))
        .collect();

    TimeSeries::new(samples)
}

/// Parse a timestamp field into seconds.
///
/// Accepts a plain number of seconds or a clock string; stray single
/// quotes are stripped and a bare `MM:SS` clock gains a `00:` hours
/// component first.
fn parse_elapsed(field: &str) -> Option<f64> {
    let cleaned = field.replace('\'', "");
    let cleaned = cleaned.trim();

    if !cleaned.contains(':') {
        return cleaned.parse::<f64>().ok().filter(|v| v.is_finite());
    }

    let clock = if cleaned.matches(':').count() == 1 {
        format!("00:{cleaned}")
    } else {
        cleaned.to_string()
    };

    let time = chrono::NaiveTime::parse_from_str(&clock, "%H:%M:%S%.f").ok()?;
    Some(f64::from(time.num_seconds_from_midnight()) + f64::from(time.nanosecond()) * 1e-9)
}
