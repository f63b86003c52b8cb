use crate::signal::{Channel, Cycle, SampleView};
use serde::{Deserialize, Serialize};

/// Mean normalized start and end of the defined run of a sparse channel.
///
/// `None` stands for a side to which no cycle contributed; it is the
/// counterpart of a NaN mean and is rendered as NaN / an empty cell at the
/// output boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IntervalTiming {
    pub start: Option<f64>,
    pub end: Option<f64>,
}

impl IntervalTiming {
    pub fn start_or_nan(&self) -> f64 {
        self.start.unwrap_or(f64::NAN)
    }

    pub fn end_or_nan(&self) -> f64 {
        self.end.unwrap_or(f64::NAN)
    }
}

/// Whole-group statistics: plain column means plus the timing of both sparse
/// ratio channels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupMeasurements {
    pub ifr_mean: Option<f64>,
    pub mid_systolic_ratio_mean: Option<f64>,
    pub pdpa_mean: Option<f64>,
    pub aortic: IntervalTiming,
    pub diastolic: IntervalTiming,
}

impl GroupMeasurements {
    /// Flattened `(iFR, mid-systolic ratio, pd/pa, aortic start, aortic end,
    /// diastolic start, diastolic end)` with NaN for missing values.
    pub fn as_tuple(&self) -> [f64; 7] {
        let nan = |v: Option<f64>| v.unwrap_or(f64::NAN);
        [
            nan(self.ifr_mean),
            nan(self.mid_systolic_ratio_mean),
            nan(self.pdpa_mean),
            self.aortic.start_or_nan(),
            self.aortic.end_or_nan(),
            self.diastolic.start_or_nan(),
            self.diastolic.end_or_nan(),
        ]
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Mean of the defined (non-NaN) cells of `channel`, `None` when there are none.
pub fn column_mean(view: &SampleView<'_>, channel: Channel) -> Option<f64> {
    let defined: Vec<f64> = view.values(channel).filter(|v| !v.is_nan()).collect();
    mean(&defined)
}

/// Average normalized time of the first and last defined sample of `channel`
/// within each cycle.
///
/// A cycle's time is normalized by its boundary timestamps, so a run starting
/// on the opening marker is 0 and one ending on the closing marker is 1.
/// Cycles without any defined sample contribute to neither side.
pub fn mean_start_end(view: &SampleView<'_>, cycles: &[Cycle], channel: Channel) -> IntervalTiming {
    let mut starts = Vec::with_capacity(cycles.len());
    let mut ends = Vec::with_capacity(cycles.len());
    for cycle in cycles {
        let t0 = view.time(cycle.start);
        let span = view.time(cycle.end) - t0;
        let defined = |pos: &usize| !view.value(channel, *pos).is_nan();
        if let Some(first) = cycle.positions().find(defined) {
            starts.push((view.time(first) - t0) / span);
        }
        if let Some(last) = cycle.positions().rev().find(defined) {
            ends.push((view.time(last) - t0) / span);
        }
    }
    IntervalTiming {
        start: mean(&starts),
        end: mean(&ends),
    }
}

/// Compute the full measurement set of a group over an already segmented
/// cycle list.
pub fn measure(view: &SampleView<'_>, cycles: &[Cycle]) -> GroupMeasurements {
    GroupMeasurements {
        ifr_mean: column_mean(view, Channel::Ifr),
        mid_systolic_ratio_mean: column_mean(view, Channel::MidSystolicRatio),
        pdpa_mean: column_mean(view, Channel::PdPa),
        aortic: mean_start_end(view, cycles, Channel::AorticRatio),
        diastolic: mean_start_end(view, cycles, Channel::DiastolicRatio),
    }
}
