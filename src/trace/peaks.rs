//! Local maxima along a one-dimensional intensity profile.

use super::options::PeakSelection;

/// Indices of strict local maxima in `profile`, in ascending order.
///
/// A sample is a maximum when it is greater than both neighbours. The first
/// and last samples have a single neighbour and are never reported, and flat
/// tops (equal neighbours) do not count. NaN never compares greater, so NaN
/// samples cannot be maxima.
pub fn find_local_maxima(profile: &[f32]) -> Vec<usize> {
    if profile.len() < 3 {
        return Vec::new();
    }
    profile
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0] && w[1] > w[2])
        .map(|(i, _)| i + 1)
        .collect()
}

/// Pick one maximum from `peaks` (ascending indices) according to `selection`.
///
/// `centre` is the cursor position expressed in the same index space.
pub fn select_peak(peaks: &[usize], centre: usize, selection: PeakSelection) -> Option<usize> {
    match selection {
        PeakSelection::First => peaks.first().copied(),
        // min_by_key keeps the first of equal keys, i.e. the lower row.
        PeakSelection::Nearest => peaks.iter().copied().min_by_key(|&p| p.abs_diff(centre)),
    }
}
