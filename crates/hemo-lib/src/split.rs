use crate::signal::{Channel, SampleView};

/// Recordings shorter than this are not split into subgroups.
pub const MIN_SPLIT_SAMPLES: usize = 1000;

/// Linearly interpolated quantile of the non-NaN `values`, `None` if there
/// are none.
pub fn quantile(values: impl IntoIterator<Item = f64>, q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Split `view` into the samples strictly below the `lower` quantile and
/// strictly above the `upper` quantile of `channel`.
///
/// Views shorter than `min_samples` are returned unsplit as two copies.
pub fn split_by_quantiles<'a>(
    view: &SampleView<'a>,
    channel: Channel,
    lower: f64,
    upper: f64,
    min_samples: usize,
) -> (SampleView<'a>, SampleView<'a>) {
    if view.len() < min_samples {
        log::warn!(
            "{}: only {} samples, not splitting by low and high {}",
            view.recording().id,
            view.len(),
            channel.column()
        );
        return (view.clone(), view.clone());
    }
    let column = view.recording().channel(channel);
    let lower_bound = quantile(view.values(channel), lower).unwrap_or(f64::NAN);
    let upper_bound = quantile(view.values(channel), upper).unwrap_or(f64::NAN);
    // NaN bounds and NaN cells compare false, leaving them out of both groups
    let low = view.filter(|i| column[i] < lower_bound);
    let high = view.filter(|i| column[i] > upper_bound);
    log::debug!(
        "{}: {} bounds {:.4}/{:.4}, low {} high {}",
        view.recording().id,
        channel.column(),
        lower_bound,
        upper_bound,
        low.len(),
        high.len()
    );
    (low, high)
}

/// Low/high quartile split of `channel`.
pub fn split_by_quartile<'a>(
    view: &SampleView<'a>,
    channel: Channel,
    min_samples: usize,
) -> (SampleView<'a>, SampleView<'a>) {
    split_by_quantiles(view, channel, 0.25, 0.75, min_samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::fixtures::recording_with_peaks;
    use crate::signal::Recording;

    fn ramp_recording(n: usize) -> Recording {
        let mut rec = recording_with_peaks(&vec![0; n]);
        // interleave so the groups are not contiguous runs
        rec.pd_pa = (0..n).map(|i| ((i * 7919) % n) as f64 / n as f64).collect();
        rec
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(values, 0.25), Some(1.75));
        assert_eq!(quantile(values, 0.75), Some(3.25));
        assert_eq!(quantile(values, 0.0), Some(1.0));
        assert_eq!(quantile(values, 1.0), Some(4.0));
        assert_eq!(quantile([5.0, f64::NAN, 1.0], 0.5), Some(3.0));
        assert_eq!(quantile([f64::NAN], 0.5), None);
    }

    #[test]
    fn groups_are_disjoint_and_outside_interquartile_range() {
        let rec = ramp_recording(2000);
        let view = SampleView::all(&rec);
        let (low, high) = split_by_quartile(&view, Channel::PdPa, MIN_SPLIT_SAMPLES);
        let q1 = quantile(view.values(Channel::PdPa), 0.25).unwrap();
        let q3 = quantile(view.values(Channel::PdPa), 0.75).unwrap();
        assert!(low.values(Channel::PdPa).all(|v| v < q1));
        assert!(high.values(Channel::PdPa).all(|v| v > q3));
        assert!(low.indices().iter().all(|i| !high.indices().contains(i)));
        assert_eq!(low.len(), 500);
        assert_eq!(high.len(), 500);
        // original order is preserved
        assert!(low.indices().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn short_recordings_are_not_split() {
        let rec = ramp_recording(999);
        let view = SampleView::all(&rec);
        let (low, high) = split_by_quartile(&view, Channel::PdPa, MIN_SPLIT_SAMPLES);
        assert_eq!(low.indices(), view.indices());
        assert_eq!(high.indices(), view.indices());
    }

    #[test]
    fn nan_ratios_fall_in_neither_group() {
        let mut rec = ramp_recording(1200);
        rec.pd_pa[10] = f64::NAN;
        let view = SampleView::all(&rec);
        let (low, high) = split_by_quartile(&view, Channel::PdPa, MIN_SPLIT_SAMPLES);
        assert!(!low.indices().contains(&10));
        assert!(!high.indices().contains(&10));
    }
}
