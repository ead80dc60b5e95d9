//! Channel detector: owns the waveform and drives processing cycles
//!
//! A [`ChannelDetector`] holds an immutable sample sequence, the live
//! parameter set, a cyclic window cursor, and a cached FFT plan. Each
//! [`process_cycle`](ChannelDetector::process_cycle) call consumes the
//! next window and runs the full pipeline over it:
//!
//! ```text
//! Window -> Magnitude Spectrum -> Baseline Removal -> Peak Extraction
//!        -> Channel Analysis -> Passband Gate -> ScanResult
//! ```
//!
//! The detector is single-threaded by construction: cycles and parameter
//! writes both need `&mut self`, so a cycle always sees a consistent
//! parameter set. Independent consumers fork their own detector instead
//! of sharing one.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustfft::{Fft, FftPlanner};
use serde::{Deserialize, Serialize};

use crate::config::{Param, ParamId, ParamSet};
use crate::detection::channels::analyze_channels;
use crate::detection::passband::gate_detections;
use crate::detection::peaks::extract_peaks;
use crate::detection::ChannelStats;
use crate::error::ChansiftError;
use crate::spectrum::baseline::whiten;
use crate::spectrum::transform::magnitude_half_spectrum;
use crate::windowing::WindowCursor;

/// Transform length in samples; spectra carry `FFT_LEN / 2` bins
pub const FFT_LEN: usize = 2048;

/// Stride between successive analysis windows, in samples
pub const WINDOW_STEP: usize = 500;

/// Output of one processing cycle
///
/// All three arrays are `FFT_LEN / 2` bins long and share the same bin
/// axis as the raw spectrum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Raw magnitude half-spectrum of the window
    pub spectrum: Vec<f64>,

    /// Whitened spectrum after peak exclusion and channel analysis;
    /// excluded bins inside analyzed channels carry the channel-zero
    /// sentinel
    pub residual: Vec<f64>,

    /// Zero everywhere except detected bins, which hold the detection
    /// sentinel
    pub detections: Vec<f64>,

    /// Per-peak channel statistics, keyed by peak bin
    pub channels: BTreeMap<usize, ChannelStats>,
}

/// Narrowband channel detector over a fixed sample sequence
///
/// # Example
///
/// ```
/// use chansift::{ChannelDetector, ParamId};
///
/// let samples: Vec<i16> = vec![0; 4096];
/// let mut detector = ChannelDetector::new(samples, 8192)?;
/// detector.set_param(ParamId::MedFiltWidth, 9)?;
///
/// let result = detector.process_cycle();
/// assert_eq!(result.spectrum.len(), chansift::FFT_LEN / 2);
/// # Ok::<(), chansift::ChansiftError>(())
/// ```
#[derive(Clone)]
pub struct ChannelDetector {
    samples: Arc<[i16]>,
    sample_rate: u32,
    params: ParamSet,
    cursor: WindowCursor,
    fft: Arc<dyn Fft<f64>>,
}

impl ChannelDetector {
    /// Create a detector over a sample sequence.
    ///
    /// All parameters start at their minimums; callers raise them through
    /// [`set_param`](Self::set_param) before scanning.
    ///
    /// # Arguments
    ///
    /// * `samples` - Raw samples, at least one
    /// * `sample_rate` - Sample rate in Hz, used only for frequency
    ///   labeling
    ///
    /// # Errors
    ///
    /// Returns `ChansiftError::LoadFailure` if `samples` is empty or
    /// `sample_rate` is zero.
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Result<Self, ChansiftError> {
        if samples.is_empty() {
            return Err(ChansiftError::LoadFailure(
                "empty sample sequence".to_string(),
            ));
        }
        if sample_rate == 0 {
            return Err(ChansiftError::LoadFailure("zero sample rate".to_string()));
        }

        let cursor = WindowCursor::new(samples.len(), WINDOW_STEP);
        let fft = FftPlanner::new().plan_fft_forward(FFT_LEN);
        log::debug!(
            "detector ready: {} samples at {} Hz, {} windows per pass",
            samples.len(),
            sample_rate,
            cursor.period()
        );

        Ok(Self {
            samples: samples.into(),
            sample_rate,
            params: ParamSet::default(),
            cursor,
            fft,
        })
    }

    /// Run one processing cycle over the next window.
    ///
    /// Advances the window cursor, then runs the transform, whitening,
    /// peak extraction, channel analysis, and passband gate with the
    /// parameter values current at this call. A cycle never fails;
    /// degenerate configurations produce empty channel maps and all-zero
    /// detection arrays rather than errors.
    pub fn process_cycle(&mut self) -> ScanResult {
        let (start, end) = self.cursor.next_window();
        let total = self.samples.len();
        let window = &self.samples[start.min(total)..end.min(total)];
        log::debug!(
            "cycle over window [{}, {}) ({} samples)",
            start,
            end,
            window.len()
        );

        // 1. Magnitude half-spectrum of the window
        let spectrum = magnitude_half_spectrum(window, self.fft.as_ref());

        // 2. Median-filter baseline removal
        let mut residual = whiten(&spectrum, self.params.value(ParamId::MedFiltWidth));

        // 3. Greedy peak extraction, zeroing exclusion zones in place
        let peaks = extract_peaks(
            &mut residual,
            self.params.value(ParamId::PeakCount),
            self.params.value(ParamId::PeakWidthBins),
        );

        // 4. Channel statistics and minimum refinement, sentinels written
        //    into the shared residual
        let channels = analyze_channels(
            &mut residual,
            &peaks,
            self.params.value(ParamId::PeakWidthBins),
            self.params.value(ParamId::ChanWidthBins),
        );

        // 5. Passband gate over the refined minima
        let detections = gate_detections(
            &channels,
            self.params.value(ParamId::PassbandStartBin),
            self.params.value(ParamId::PassbandStopBin),
            spectrum.len(),
        );

        ScanResult {
            spectrum,
            residual,
            detections,
            channels,
        }
    }

    /// Immutable view of all adjustable parameters.
    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    /// Bounds and current value of one parameter.
    pub fn param(&self, id: ParamId) -> Param {
        self.params.get(id)
    }

    /// Set an adjustable parameter.
    ///
    /// # Errors
    ///
    /// Returns `ChansiftError::ParameterOutOfRange` if `value` falls
    /// outside the parameter's bounds; the previous value stays in effect.
    pub fn set_param(&mut self, id: ParamId, value: usize) -> Result<(), ChansiftError> {
        self.params.set_value(id, value)
    }

    /// Independent detector over the same samples.
    ///
    /// The fork shares the sample storage but gets its own window cursor,
    /// rewound to the first window, and its own snapshot of the current
    /// parameter values. Later changes on either side stay private.
    pub fn fork(&self) -> ChannelDetector {
        let mut forked = self.clone();
        forked.cursor.rewind();
        forked
    }

    /// Window cursor, for inspecting scan position and period.
    pub fn cursor(&self) -> &WindowCursor {
        &self.cursor
    }

    /// Center frequency in Hz of a spectrum bin.
    pub fn bin_frequency(&self, bin: usize) -> f64 {
        bin as f64 * self.frequency_resolution()
    }

    /// Width in Hz of one spectrum bin.
    pub fn frequency_resolution(&self) -> f64 {
        f64::from(self.sample_rate) / FFT_LEN as f64
    }

    /// Number of samples in the sequence.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Sample rate of the sequence, in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
