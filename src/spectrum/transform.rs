//! Magnitude spectrum of one sample window
//!
//! Samples are transformed as-is: no window function is applied before
//! the FFT, so spectral leakage from the rectangular cut is part of the
//! signal the later stages see. Windows shorter than the transform length
//! are zero-padded; longer ones are truncated.

use rustfft::num_complex::Complex;
use rustfft::Fft;

/// Compute the magnitude half-spectrum of a window of samples.
///
/// The window is zero-padded (or truncated) to the plan's transform
/// length, transformed, and the magnitude of the first half of the
/// coefficients is returned. For real input the second half mirrors the
/// first, so only `fft.len() / 2` bins carry information.
///
/// # Arguments
///
/// * `samples` - Window of raw samples, any length
/// * `fft` - Forward FFT plan; its length fixes the zero-padding target
///
/// # Returns
///
/// Magnitude spectrum of `fft.len() / 2` bins, DC first
pub fn magnitude_half_spectrum(samples: &[i16], fft: &dyn Fft<f64>) -> Vec<f64> {
    let fft_len = fft.len();
    log::debug!(
        "transforming {} samples into {} spectrum bins",
        samples.len(),
        fft_len / 2
    );

    let mut buffer: Vec<Complex<f64>> = vec![Complex::new(0.0, 0.0); fft_len];
    for (slot, &sample) in buffer.iter_mut().zip(samples.iter()) {
        *slot = Complex::new(f64::from(sample), 0.0);
    }

    fft.process(&mut buffer);

    buffer[..fft_len / 2].iter().map(|c| c.norm()).collect()
}
