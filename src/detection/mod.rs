//! Peak extraction, channel analysis, and passband gating
//!
//! Works on the whitened residual from the spectrum stage:
//! - Extract the strongest peaks, zeroing an exclusion zone around each
//! - Measure the channel adjacent to each peak and refine its minimum
//! - Gate refined minima against the configured passband

pub mod channels;
pub mod passband;
pub mod peaks;

use serde::{Deserialize, Serialize};

/// Statistics for one analyzed channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    /// Mean of the channel slice, taken before sentinel replacement
    pub mean: f64,

    /// Population variance of the channel slice, taken before sentinel
    /// replacement
    pub variance: f64,

    /// Absolute bin index of the channel's refined minimum
    pub chan_min: usize,
}
