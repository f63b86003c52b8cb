use crate::condition::ConditionRule;
use crate::signal::DIASTOLIC_PEAK;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters for cycle averaging and batch processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Length of every normalized curve.
    pub num_points: usize,
    /// Peak code delimiting cycles.
    pub diastolic_marker: i64,
    /// Recordings shorter than this are not split into low/high groups.
    pub min_split_samples: usize,
    /// Quantile of pd/pa below which samples form the low group.
    pub lower_quantile: f64,
    /// Quantile of pd/pa above which samples form the high group.
    pub upper_quantile: f64,
    /// File extension (without dot) of input recordings.
    pub extension: String,
    /// Log and skip failing files instead of aborting the batch.
    pub continue_on_error: bool,
    pub condition: ConditionRule,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            num_points: 100,
            diastolic_marker: DIASTOLIC_PEAK,
            min_split_samples: 1000,
            lower_quantile: 0.25,
            upper_quantile: 0.75,
            extension: "csv".into(),
            continue_on_error: false,
            condition: ConditionRule::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: AnalysisConfig = toml::from_str(text).context("parsing analysis config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_points < 2 {
            anyhow::bail!("num_points must be at least 2, got {}", self.num_points);
        }
        let in_range = |q: f64| (0.0..=1.0).contains(&q);
        if !in_range(self.lower_quantile)
            || !in_range(self.upper_quantile)
            || self.lower_quantile > self.upper_quantile
        {
            anyhow::bail!(
                "quantiles must satisfy 0 <= lower <= upper <= 1 (got {} / {})",
                self.lower_quantile,
                self.upper_quantile
            );
        }
        Ok(())
    }
}
