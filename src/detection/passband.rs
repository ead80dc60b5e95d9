//! Passband gating of refined channel minima
//!
//! The last stage of a cycle: every channel minimum strictly inside the
//! configured passband is marked in a fresh detection array with a
//! sentinel magnitude. Scan consumers overlay this array on the raw
//! spectrum, so the sentinel is sized to tower over any real bin.

use std::collections::BTreeMap;

use super::ChannelStats;

/// Magnitude written at a detected bin
pub const DETECTION_SENTINEL: f64 = 1e7;

/// Build the detection array for one cycle.
///
/// A channel minimum `m` produces a detection when
/// `passband_start_bin < m < passband_stop_bin`, both bounds exclusive.
/// Bins at the passband edges never fire.
///
/// # Arguments
///
/// * `channels` - Channel statistics keyed by peak bin
/// * `passband_start_bin` - Lower passband edge, exclusive
/// * `passband_stop_bin` - Upper passband edge, exclusive
/// * `spectrum_len` - Length of the detection array to build
///
/// # Returns
///
/// Array of `spectrum_len` zeros with [`DETECTION_SENTINEL`] at each
/// detected bin
pub fn gate_detections(
    channels: &BTreeMap<usize, ChannelStats>,
    passband_start_bin: usize,
    passband_stop_bin: usize,
    spectrum_len: usize,
) -> Vec<f64> {
    let mut detections = vec![0.0; spectrum_len];
    let mut marked = 0;

    for stats in channels.values() {
        let bin = stats.chan_min;
        if bin > passband_start_bin && bin < passband_stop_bin && bin < spectrum_len {
            detections[bin] = DETECTION_SENTINEL;
            marked += 1;
        }
    }

    log::debug!(
        "{} of {} channel minima inside passband ({}, {})",
        marked,
        channels.len(),
        passband_start_bin,
        passband_stop_bin
    );
    detections
}
