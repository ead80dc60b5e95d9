//! Greedy peak extraction with exclusion zones
//!
//! Repeatedly takes the residual's argmax and zeroes a window around it
//! so the next pass finds the next-strongest bin elsewhere. The zeroing
//! mutates the residual in place; the channel analyzer downstream reads
//! the same buffer and relies on those zeros to mark excluded bins.

/// Extract `peak_count` peaks from `residual`, zeroing an exclusion zone
/// around each selected bin in place.
///
/// Selection is a strict argmax scan, so ties resolve to the lowest
/// index. The exclusion zone for a peak `p` spans
/// `[p - peak_width_bins/2, p + peak_width_bins/2]`, clipped to the
/// array at the low end only; the high end simply stops at the last bin.
/// Once every value has been zeroed the scan keeps returning bin 0, so
/// the tail of the returned list can repeat when the residual runs out
/// of energy before `peak_count` does.
///
/// # Arguments
///
/// * `residual` - Whitened spectrum, mutated in place
/// * `peak_count` - Number of peaks to extract
/// * `peak_width_bins` - Width of the exclusion zone in bins
///
/// # Returns
///
/// Selected peak bins in extraction order, strongest first
pub fn extract_peaks(
    residual: &mut [f64],
    peak_count: usize,
    peak_width_bins: usize,
) -> Vec<usize> {
    log::debug!(
        "extracting {} peaks with exclusion width {} from {} bins",
        peak_count,
        peak_width_bins,
        residual.len()
    );

    let mut peaks = Vec::with_capacity(peak_count);
    if residual.is_empty() {
        return peaks;
    }

    let half = peak_width_bins / 2;
    for _ in 0..peak_count {
        // Strict argmax: ties and an all-zero buffer both yield the
        // lowest eligible index
        let mut peak = 0;
        let mut best = residual[0];
        for (bin, &value) in residual.iter().enumerate().skip(1) {
            if value > best {
                best = value;
                peak = bin;
            }
        }
        peaks.push(peak);

        let lo = peak.saturating_sub(half);
        let hi = (peak + half).min(residual.len() - 1);
        for value in residual[lo..=hi].iter_mut() {
            *value = 0.0;
        }
    }

    peaks
}
