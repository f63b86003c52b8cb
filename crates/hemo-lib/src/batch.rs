use crate::analysis::{analyze_recording, RecordingAnalysis};
use crate::config::AnalysisConfig;
use crate::io::discover::find_recordings;
use crate::io::recording::read_recording_csv;
use crate::plot::{figure_from_group, plot_path, PlotBackend};
use crate::report::Report;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: Vec<PathBuf>,
}

/// Drives discovery, analysis, plotting and reporting over a directory tree.
pub struct BatchRunner<B: PlotBackend> {
    config: AnalysisConfig,
    report: Report,
    backend: B,
}

impl<B: PlotBackend> BatchRunner<B> {
    /// Creates the (empty) report in `output_dir` straight away.
    pub fn new(config: AnalysisConfig, output_dir: &Path, backend: B) -> Result<Self> {
        let report = Report::create(output_dir)?;
        Ok(Self {
            config,
            report,
            backend,
        })
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one recording, draw its three plots next to it, then append its
    /// row to the report and rewrite the report file.
    ///
    /// Nothing is appended if any step fails.
    pub fn process_file(&mut self, path: &Path) -> Result<RecordingAnalysis> {
        let recording = read_recording_csv(path)?;
        let analysis = analyze_recording(&recording, &self.config)
            .with_context(|| format!("analyzing {}", path.display()))?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        for group in &analysis.groups {
            let fig = figure_from_group(&analysis, group);
            let out = plot_path(dir, &analysis.id, group.group);
            self.backend
                .draw(&fig, &out)
                .with_context(|| format!("drawing {}", out.display()))?;
        }
        self.report.append(analysis.summary());
        self.report.flush()?;
        log::info!(
            "{}: processed as {}",
            path.display(),
            analysis.condition.suffix()
        );
        Ok(analysis)
    }

    /// Process every recording below `input_dir` in path order.
    ///
    /// The first failure aborts the run unless `continue_on_error` is set, in
    /// which case failing files are logged and listed in the summary.
    pub fn run(&mut self, input_dir: &Path) -> Result<BatchSummary> {
        let files = find_recordings(input_dir, &self.config.extension)?;
        let mut summary = BatchSummary::default();
        for path in files {
            match self.process_file(&path) {
                Ok(_) => summary.processed += 1,
                Err(err) if self.config.continue_on_error => {
                    log::error!("skipping {}: {:#}", path.display(), err);
                    summary.failed.push(path);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(summary)
    }
}
