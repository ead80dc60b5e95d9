//! # Chansift
//!
//! A narrowband channel detector for sampled waveforms. The sample
//! sequence is scanned in fixed-stride windows; each window's magnitude
//! spectrum is whitened against a median-filter baseline, the strongest
//! peaks are extracted, and the channel adjacent to each peak is measured
//! and gated against a configurable passband.
//!
//! ## Features
//!
//! - **Cyclic scanning**: windows wrap around the sequence, so a detector
//!   can run forever over a finite capture
//! - **Live tuning**: six bounded parameters adjustable between cycles
//! - **Channel statistics**: mean, variance, and a refined minimum per
//!   detected peak
//!
//! ## Quick Start
//!
//! ```
//! use chansift::{ChannelDetector, ParamId, DETECTION_SENTINEL};
//!
//! let samples: Vec<i16> = vec![0; 44100];
//! let mut detector = ChannelDetector::new(samples, 44100)?;
//! detector.set_param(ParamId::MedFiltWidth, 9)?;
//! detector.set_param(ParamId::PeakCount, 5)?;
//!
//! let result = detector.process_cycle();
//! let hits = result
//!     .detections
//!     .iter()
//!     .filter(|&&v| v == DETECTION_SENTINEL)
//!     .count();
//! println!("{} detection(s)", hits);
//! # Ok::<(), chansift::ChansiftError>(())
//! ```
//!
//! ## Architecture
//!
//! One processing cycle flows through the stages below:
//!
//! ```text
//! Window -> Magnitude Spectrum -> Baseline Removal -> Peak Extraction
//!        -> Channel Analysis -> Passband Gate -> ScanResult
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod detection;
pub mod detector;
pub mod error;
pub mod spectrum;
pub mod windowing;

// Re-export main types
pub use config::{Param, ParamId, ParamSet};
pub use detection::channels::CHANNEL_ZERO_SENTINEL;
pub use detection::passband::DETECTION_SENTINEL;
pub use detection::ChannelStats;
pub use detector::{ChannelDetector, ScanResult, FFT_LEN, WINDOW_STEP};
pub use error::ChansiftError;
pub use windowing::WindowCursor;
