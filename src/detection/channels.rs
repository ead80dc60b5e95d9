//! Per-peak channel statistics and minimum refinement
//!
//! Each extracted peak anchors a channel: the stretch of residual bins
//! just above the peak's exclusion zone. The channel's mean and variance
//! are measured, bins zeroed by peak exclusion are replaced with a large
//! sentinel so they cannot win a minimum search, and the channel's
//! refined minimum becomes the candidate bin the passband gate sees.
//!
//! The sentinel replacement writes through into the shared residual
//! buffer. Later channels that overlap an already-analyzed stretch see
//! the sentinels instead of zeros, and the residual a caller gets back
//! carries them too.

use std::collections::BTreeMap;

use super::ChannelStats;

/// Replacement for bins zeroed by peak exclusion; far above any real
/// residual value, so a sentinel never wins the minimum search.
pub const CHANNEL_ZERO_SENTINEL: f64 = 1e5;

/// Analyze the channel adjacent to each peak.
///
/// The channel for a peak `p` is the residual slice
/// `[p + peak_width_bins/2, p + chan_width_bins - peak_width_bins/2)`,
/// shrunk to fit the array; an inverted range is empty. Channels shorter
/// than 2 bins are skipped. For each surviving channel:
///
/// 1. Mean and population variance are taken over the raw slice
/// 2. Zero bins are overwritten with [`CHANNEL_ZERO_SENTINEL`] in place
/// 3. The minimum search starts from the slice maximum and scans slice
///    indices `1..len`, keeping the first strictly smaller value; the
///    first element is never eligible, so an all-equal channel reports
///    offset 0
///
/// The refined minimum `chan_min` is `p` plus the winning offset. A peak
/// that appears more than once overwrites its map entry, with statistics
/// recomputed against the by-then mutated buffer.
///
/// # Arguments
///
/// * `without_peaks` - Residual after peak exclusion, mutated in place
/// * `peaks` - Peak bins from the extraction pass
/// * `peak_width_bins` - Exclusion width used during extraction
/// * `chan_width_bins` - Total channel width measured from the peak
///
/// # Returns
///
/// Channel statistics keyed by peak bin
pub fn analyze_channels(
    without_peaks: &mut [f64],
    peaks: &[usize],
    peak_width_bins: usize,
    chan_width_bins: usize,
) -> BTreeMap<usize, ChannelStats> {
    log::debug!(
        "analyzing {} channels, peak width {}, channel width {}",
        peaks.len(),
        peak_width_bins,
        chan_width_bins
    );

    let half = peak_width_bins / 2;
    let len = without_peaks.len();
    let mut stats = BTreeMap::new();

    for &peak in peaks {
        let start = (peak + half).min(len);
        let stop = (peak + chan_width_bins)
            .saturating_sub(half)
            .min(len)
            .max(start);
        let chan = &mut without_peaks[start..stop];

        if chan.len() < 2 {
            log::warn!(
                "skipping degenerate channel at peak {} ({} bins)",
                peak,
                chan.len()
            );
            continue;
        }

        let mean = chan.iter().sum::<f64>() / chan.len() as f64;
        let variance = chan
            .iter()
            .map(|value| {
                let delta = value - mean;
                delta * delta
            })
            .sum::<f64>()
            / chan.len() as f64;

        for value in chan.iter_mut() {
            if *value == 0.0 {
                *value = CHANNEL_ZERO_SENTINEL;
            }
        }

        // Running minimum seeded with the channel maximum; the scan skips
        // the first element
        let mut smallest = chan.iter().copied().fold(0.0f64, f64::max);
        let mut offset = 0;
        for (idx, &value) in chan.iter().enumerate().skip(1) {
            if value < smallest {
                smallest = value;
                offset = idx;
            }
        }

        stats.insert(
            peak,
            ChannelStats {
                mean,
                variance,
                chan_min: peak + offset,
            },
        );
    }

    log::debug!("{} channels analyzed", stats.len());
    stats
}
