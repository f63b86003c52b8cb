//! Aggregate results table.
//!
//! One row is appended per processed recording and the whole table is
//! rewritten on every flush, so the file on disk always reflects every
//! recording processed so far. Rows are not merged by patient: a patient with
//! rest, adenosine and dobutamine recordings ends up with three rows, each
//! filling only its own condition's columns.

use crate::condition::Condition;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_FILE_NAME: &str = "results.csv";

pub const REPORT_COLUMNS: [&str; 10] = [
    "patient_id",
    "iFR_mean_rest",
    "mid_systolic_ratio_mean_rest",
    "pdpa_mean_rest",
    "iFR_mean_ado",
    "mid_systolic_ratio_mean_ado",
    "pdpa_mean_ado",
    "iFR_mean_dobu",
    "mid_systolic_ratio_mean_dobu",
    "pdpa_mean_dobu",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub patient_id: String,
    pub condition: Condition,
    pub ifr_mean: Option<f64>,
    pub mid_systolic_ratio_mean: Option<f64>,
    pub pdpa_mean: Option<f64>,
}

impl ReportRow {
    /// Cells in [`REPORT_COLUMNS`] order; other conditions and missing means
    /// are empty.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![String::new(); REPORT_COLUMNS.len()];
        cells[0] = self.patient_id.clone();
        let offset = match self.condition {
            Condition::Rest => 1,
            Condition::Adenosine => 4,
            Condition::Dobutamine => 7,
        };
        for (i, value) in [self.ifr_mean, self.mid_systolic_ratio_mean, self.pdpa_mean]
            .into_iter()
            .enumerate()
        {
            if let Some(v) = value {
                cells[offset + i] = v.to_string();
            }
        }
        cells
    }
}

/// In-memory results table bound to its output file.
#[derive(Debug)]
pub struct Report {
    path: PathBuf,
    rows: Vec<ReportRow>,
}

impl Report {
    /// Create `output_dir` if needed and write a header-only report into it.
    pub fn create(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("creating output directory {}", output_dir.display()))?;
        let report = Self {
            path: output_dir.join(REPORT_FILE_NAME),
            rows: Vec::new(),
        };
        report.flush()?;
        Ok(report)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn append(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    /// Rewrite the report file with the header and every row so far.
    pub fn flush(&self) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("opening report {}", self.path.display()))?;
        writer.write_record(REPORT_COLUMNS).context("writing report header")?;
        for row in &self.rows {
            writer
                .write_record(row.cells())
                .with_context(|| format!("writing report row {}", row.patient_id))?;
        }
        writer
            .flush()
            .with_context(|| format!("flushing report {}", self.path.display()))?;
        log::info!("{}: {} rows", self.path.display(), self.rows.len());
        Ok(())
    }
}
