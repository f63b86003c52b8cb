use crate::error::{AnalysisError, AnalysisResult};
use crate::signal::{Channel, Cycle, SampleView};
use serde::{Deserialize, Serialize};

/// Representative waveform sampled on a uniform [0, 1] time axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedCurve {
    pub time: Vec<f64>,
    pub values: Vec<f64>,
}

impl NormalizedCurve {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn points(&self) -> Vec<[f64; 2]> {
        self.time
            .iter()
            .zip(&self.values)
            .map(|(&t, &v)| [t, v])
            .collect()
    }
}

/// `n` evenly spaced values over [0, 1], both endpoints included exactly.
pub fn linspace(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = 1.0 / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| i as f64 * step).collect();
            out[n - 1] = 1.0;
            out
        }
    }
}

/// Piecewise-linear interpolation of `(xp, fp)` at `x`. `xp` must be
/// increasing; values outside its range are clamped to the end samples.
pub fn interp(x: &[f64], xp: &[f64], fp: &[f64]) -> Vec<f64> {
    if xp.is_empty() || fp.is_empty() {
        return vec![f64::NAN; x.len()];
    }
    let last = xp.len().min(fp.len()) - 1;
    x.iter()
        .map(|&t| {
            if t.is_nan() {
                return f64::NAN;
            }
            if t <= xp[0] {
                return fp[0];
            }
            if t >= xp[last] {
                return fp[last];
            }
            // xp[0] < t < xp[last], so seg + 1 <= last
            let seg = xp[..=last].partition_point(|&v| v <= t) - 1;
            let (x0, x1) = (xp[seg], xp[seg + 1]);
            let (y0, y1) = (fp[seg], fp[seg + 1]);
            if t == x0 {
                return y0;
            }
            y0 + (y1 - y0) * (t - x0) / (x1 - x0)
        })
        .collect()
}

/// Rescale every cycle of `channel` to `num_points` samples and average them
/// index by index.
///
/// Cycles with fewer than two samples are skipped; if none remain the call
/// fails with [`AnalysisError::NoValidIntervals`]. NaN samples propagate into
/// the average.
pub fn normalize_and_average(
    view: &SampleView<'_>,
    cycles: &[Cycle],
    channel: Channel,
    num_points: usize,
) -> AnalysisResult<NormalizedCurve> {
    let target = linspace(num_points);
    let mut sum = vec![0.0; num_points];
    let mut used = 0usize;
    for cycle in cycles {
        if cycle.len() < 2 {
            continue;
        }
        let values: Vec<f64> = cycle.positions().map(|pos| view.value(channel, pos)).collect();
        let source = linspace(values.len());
        let rescaled = interp(&target, &source, &values);
        for (acc, v) in sum.iter_mut().zip(rescaled) {
            *acc += v;
        }
        used += 1;
    }
    if used == 0 {
        return Err(AnalysisError::NoValidIntervals);
    }
    let values = sum.into_iter().map(|s| s / used as f64).collect();
    Ok(NormalizedCurve {
        time: target,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycles::segment_cycles;
    use crate::signal::fixtures::recording_with_peaks;
    use crate::signal::DIASTOLIC_PEAK;

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() <= tol, "{} vs {} (tol {})", a, b, tol);
    }

    #[test]
    fn linspace_hits_both_endpoints() {
        let axis = linspace(7);
        assert_eq!(axis.len(), 7);
        assert_eq!(axis[0], 0.0);
        assert_eq!(axis[6], 1.0);
        assert_close(axis[3], 0.5, 1e-12);
        assert_eq!(linspace(1), vec![0.0]);
    }

    #[test]
    fn interp_matches_linear_segments_and_clamps() {
        let xp = [0.0, 1.0, 2.0];
        let fp = [0.0, 10.0, 0.0];
        let out = interp(&[-1.0, 0.0, 0.5, 1.0, 1.25, 2.0, 3.0], &xp, &fp);
        assert_eq!(out, vec![0.0, 0.0, 5.0, 10.0, 7.5, 0.0, 0.0]);
    }

    #[test]
    fn interp_handles_unsorted_queries() {
        let xp = [0.0, 1.0, 2.0, 3.0];
        let fp = [0.0, 1.0, 4.0, 9.0];
        let out = interp(&[2.5, 0.5, 1.5], &xp, &fp);
        assert_eq!(out, vec![6.5, 0.5, 2.5]);
    }

    #[test]
    fn averaged_curve_endpoints_are_mean_of_cycle_endpoints() {
        // cycles (0,3) and (3,5); aortic = 100 + index
        let rec = recording_with_peaks(&[2, 0, 0, 2, 0, 2]);
        let view = SampleView::all(&rec);
        let cycles = segment_cycles(&view, DIASTOLIC_PEAK).unwrap();
        let curve = normalize_and_average(&view, &cycles, Channel::AorticPressure, 100).unwrap();
        assert_eq!(curve.len(), 100);
        assert_eq!(curve.time.len(), 100);
        assert_close(curve.values[0], (100.0 + 103.0) / 2.0, 1e-9);
        assert_close(curve.values[99], (103.0 + 105.0) / 2.0, 1e-9);
        // both cycles are linear ramps, so the midpoint is the mean of their midpoints
        let mid = normalize_and_average(&view, &cycles, Channel::AorticPressure, 3).unwrap();
        assert_close(mid.values[1], (101.5 + 104.0) / 2.0, 1e-9);
    }

    #[test]
    fn nan_samples_propagate() {
        let mut rec = recording_with_peaks(&[2, 0, 0, 2]);
        rec.p_distal[1] = f64::NAN;
        let view = SampleView::all(&rec);
        let cycles = segment_cycles(&view, DIASTOLIC_PEAK).unwrap();
        let curve = normalize_and_average(&view, &cycles, Channel::DistalPressure, 10).unwrap();
        assert!(curve.values[0].is_finite());
        assert!(curve.values[2].is_nan());
        assert!(curve.values[9].is_finite());
    }

    #[test]
    fn only_degenerate_cycles_fail() {
        let rec = recording_with_peaks(&[2, 2]);
        let view = SampleView::all(&rec);
        let degenerate = [Cycle { start: 1, end: 1 }];
        let err = normalize_and_average(&view, &degenerate, Channel::AorticPressure, 100)
            .unwrap_err();
        assert_eq!(err, AnalysisError::NoValidIntervals);
        // adjacent markers still span two samples and are kept
        let cycles = segment_cycles(&view, DIASTOLIC_PEAK).unwrap();
        assert!(normalize_and_average(&view, &cycles, Channel::AorticPressure, 100).is_ok());
    }
}
