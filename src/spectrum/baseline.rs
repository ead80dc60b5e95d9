//! Median-filter baseline removal
//!
//! Narrowband channels ride on a broadband noise floor. A running median
//! tracks the floor while ignoring narrow excursions, so subtracting it
//! leaves a residual in which channel energy stands out. The kernel is
//! short enough that edges matter: positions hanging past either end of
//! the spectrum contribute zeros to the window, pulling the baseline
//! toward zero at the first and last few bins.

use std::cmp::Ordering;

/// Median-filter `spectrum` with an odd kernel `width`.
///
/// Window positions past either end of the array are treated as zeros,
/// matching the usual zero-padded running median.
///
/// # Arguments
///
/// * `spectrum` - Input values
/// * `width` - Kernel width in bins, must be odd
///
/// # Returns
///
/// Filtered values, same length as `spectrum`
pub fn median_filter(spectrum: &[f64], width: usize) -> Vec<f64> {
    debug_assert!(width % 2 == 1, "median filter width must be odd");

    let half = (width / 2) as isize;
    let len = spectrum.len() as isize;
    let mut filtered = Vec::with_capacity(spectrum.len());
    let mut window = Vec::with_capacity(width);

    for center in 0..len {
        window.clear();
        for pos in (center - half)..=(center + half) {
            if pos < 0 || pos >= len {
                window.push(0.0);
            } else {
                window.push(spectrum[pos as usize]);
            }
        }
        window.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        filtered.push(window[width / 2]);
    }

    filtered
}

/// Subtract the median baseline from `spectrum` and return the absolute
/// residual.
///
/// An even `med_filt_width` is widened by one bin, since the median needs
/// an odd kernel. Width 1 makes the filter the identity, so the residual
/// is all zeros and nothing downstream can find a peak.
///
/// # Arguments
///
/// * `spectrum` - Magnitude spectrum to whiten
/// * `med_filt_width` - Requested kernel width in bins
///
/// # Returns
///
/// `|spectrum - baseline|` per bin
pub fn whiten(spectrum: &[f64], med_filt_width: usize) -> Vec<f64> {
    let width = if med_filt_width % 2 == 1 {
        med_filt_width
    } else {
        med_filt_width + 1
    };
    log::debug!("whitening {} bins, median width {}", spectrum.len(), width);

    if width == 1 {
        log::warn!("median width 1 is the identity; residual will be all zeros");
    }

    let baseline = median_filter(spectrum, width);
    spectrum
        .iter()
        .zip(baseline.iter())
        .map(|(value, base)| (value - base).abs())
        .collect()
}
