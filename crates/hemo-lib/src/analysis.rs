use crate::condition::Condition;
use crate::config::AnalysisConfig;
use crate::curve::{normalize_and_average, NormalizedCurve};
use crate::cycles::segment_cycles;
use crate::error::AnalysisResult;
use crate::report::ReportRow;
use crate::signal::{Channel, Recording, SampleView};
use crate::split::split_by_quantiles;
use crate::timing::{measure, GroupMeasurements};
use serde::{Deserialize, Serialize};

/// Sample selection a set of curves was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    All,
    Low,
    High,
}

impl Group {
    pub const ALL: [Group; 3] = [Group::All, Group::Low, Group::High];

    /// Token used in plot file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::All => "all",
            Group::Low => "low",
            Group::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Group::All => "All",
            Group::Low => "Low",
            Group::High => "High",
        }
    }
}

/// Averaged pressure curves and statistics for one group. Both curves share
/// the same time axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupAnalysis {
    pub group: Group,
    pub cycles: usize,
    pub aortic: NormalizedCurve,
    pub distal: NormalizedCurve,
    pub measurements: GroupMeasurements,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingAnalysis {
    pub id: String,
    pub condition: Condition,
    pub groups: Vec<GroupAnalysis>,
}

impl RecordingAnalysis {
    pub fn group(&self, group: Group) -> Option<&GroupAnalysis> {
        self.groups.iter().find(|g| g.group == group)
    }

    /// Report row built from the whole-recording means.
    pub fn summary(&self) -> ReportRow {
        let whole = self
            .group(Group::All)
            .map(|g| g.measurements)
            .unwrap_or_default();
        ReportRow {
            patient_id: self.id.clone(),
            condition: self.condition,
            ifr_mean: whole.ifr_mean,
            mid_systolic_ratio_mean: whole.mid_systolic_ratio_mean,
            pdpa_mean: whole.pdpa_mean,
        }
    }
}

/// Segment `view` once and derive both pressure curves and the measurement
/// set from that cycle list.
pub fn analyze_group(
    view: &SampleView<'_>,
    group: Group,
    config: &AnalysisConfig,
) -> AnalysisResult<GroupAnalysis> {
    let cycles = segment_cycles(view, config.diastolic_marker)?;
    let aortic = normalize_and_average(view, &cycles, Channel::AorticPressure, config.num_points)?;
    let distal = normalize_and_average(view, &cycles, Channel::DistalPressure, config.num_points)?;
    Ok(GroupAnalysis {
        group,
        cycles: cycles.len(),
        aortic,
        distal,
        measurements: measure(view, &cycles),
    })
}

/// Run the whole, low pd/pa and high pd/pa analyses of a recording.
///
/// The first failing group aborts the recording.
pub fn analyze_recording(
    recording: &Recording,
    config: &AnalysisConfig,
) -> AnalysisResult<RecordingAnalysis> {
    let condition = config.condition.classify(&recording.id);
    let whole = SampleView::all(recording);
    let (low, high) = split_by_quantiles(
        &whole,
        Channel::PdPa,
        config.lower_quantile,
        config.upper_quantile,
        config.min_split_samples,
    );
    let mut groups = Vec::with_capacity(Group::ALL.len());
    for (group, view) in [(Group::All, &whole), (Group::Low, &low), (Group::High, &high)] {
        groups.push(analyze_group(view, group, config)?);
    }
    Ok(RecordingAnalysis {
        id: recording.id.clone(),
        condition,
        groups,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::signal::{Recording, DIASTOLIC_PEAK};
    use std::f64::consts::PI;

    /// Synthetic recording of `beats` cycles of `period` samples each with a
    /// slowly drifting pd/pa, so the quartile split yields usable groups.
    pub fn synthetic_recording(id: &str, beats: usize, period: usize) -> Recording {
        let n = beats * period + 1;
        let mut rec = Recording::new(id);
        for i in 0..n {
            let phase = (i % period) as f64 / period as f64;
            let beat = i / period;
            let pd_pa = 0.75 + 0.2 * (beat as f64 / beats as f64);
            let p_aortic = 90.0 + 30.0 * (2.0 * PI * phase).sin();
            rec.time.push(i as f64 * 0.004);
            rec.p_aortic.push(p_aortic);
            rec.p_distal.push(p_aortic * pd_pa);
            rec.pd_pa.push(pd_pa);
            rec.ifr.push(pd_pa + 0.05);
            rec.mid_systolic_ratio.push(pd_pa - 0.02);
            rec.peaks.push(if i % period == 0 { DIASTOLIC_PEAK } else { 0 });
            rec.aortic_ratio.push(if (0.1..0.3).contains(&phase) {
                pd_pa
            } else {
                f64::NAN
            });
            rec.diastolic_ratio.push(if (0.5..0.9).contains(&phase) {
                pd_pa
            } else {
                f64::NAN
            });
        }
        rec
    }
}
