use crate::error::{AnalysisError, AnalysisResult};
use crate::signal::{Cycle, SampleView};

/// Split a view into cycles delimited by consecutive occurrences of `marker`
/// in the peak column.
///
/// Fails when fewer than two markers are present. Degenerate spans are
/// returned as-is; consumers skip cycles shorter than two samples.
pub fn segment_cycles(view: &SampleView<'_>, marker: i64) -> AnalysisResult<Vec<Cycle>> {
    let boundaries: Vec<usize> = (0..view.len()).filter(|&pos| view.peak(pos) == marker).collect();
    if boundaries.len() < 2 {
        return Err(AnalysisError::InsufficientPeaks {
            found: boundaries.len(),
        });
    }
    let cycles: Vec<Cycle> = boundaries
        .windows(2)
        .map(|w| Cycle {
            start: w[0],
            end: w[1],
        })
        .collect();
    log::debug!(
        "{}: {} cycles from {} samples",
        view.recording().id,
        cycles.len(),
        view.len()
    );
    Ok(cycles)
}
