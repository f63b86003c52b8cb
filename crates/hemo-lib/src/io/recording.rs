use crate::error::AnalysisError;
use crate::signal::{Channel, Recording, PEAKS_COLUMN};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;

/// Recording identifier: the file name up to its first `.`.
pub fn recording_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

/// Read a recording from a comma-separated file with a header row.
///
/// Every channel column and the `peaks` column must be present. Empty cells
/// become NaN (peak code 0); other columns are ignored. Peak codes must be
/// integral.
pub fn read_recording_csv(path: &Path) -> Result<Recording> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let headers = reader.headers().context("reading header")?.clone();

    let channel_idx = Channel::ALL
        .iter()
        .map(|&channel| locate_column(&headers, channel.column()).map(|idx| (channel, idx)))
        .collect::<Result<Vec<_>>>()?;
    let peaks_idx = locate_column(&headers, PEAKS_COLUMN)?;

    let mut rec = Recording::new(recording_id(path));
    for (row, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("reading record {}", row + 1))?;
        for &(channel, idx) in &channel_idx {
            let value = parse_cell(&record, idx)
                .with_context(|| format!("row {}: column {}", row + 1, channel.column()))?;
            rec.channel_mut(channel).push(value);
        }
        let peak = parse_cell(&record, peaks_idx)
            .and_then(peak_code)
            .with_context(|| format!("row {}: column {}", row + 1, PEAKS_COLUMN))?;
        rec.peaks.push(peak);
    }
    log::debug!("{}: read {} samples", path.display(), rec.len());
    Ok(rec)
}

fn parse_cell(record: &StringRecord, idx: usize) -> Result<f64> {
    let cell = record.get(idx).unwrap_or("").trim();
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>()
        .with_context(|| format!("invalid number '{}'", cell))
}

/// Marker codes are integers; `2.0` is accepted, `2.7` is not.
fn peak_code(value: f64) -> Result<i64> {
    if value.is_nan() {
        Ok(0)
    } else if value.fract() == 0.0 && value.is_finite() {
        Ok(value as i64)
    } else {
        anyhow::bail!("non-integral peak code {}", value)
    }
}

fn locate_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()).into())
}
