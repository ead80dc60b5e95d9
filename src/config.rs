//! Adjustable parameters for the detection pipeline
//!
//! The six parameters below are the complete set of runtime controls.
//! Each carries fixed `[min, max]` bounds and starts at its minimum.
//! Writes outside the bounds are rejected and leave the previous value
//! in place; values are never clamped.

use serde::{Deserialize, Serialize};

use crate::error::ChansiftError;

/// Identifier for one adjustable parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamId {
    /// Median filter kernel width in bins (range 1-30, default: 1)
    /// Even values are widened by one bin at use; width 1 is the identity
    MedFiltWidth,

    /// Number of peaks extracted per cycle (range 1-15, default: 1)
    PeakCount,

    /// Width in bins of the exclusion zone zeroed around each peak
    /// (range 1-60, default: 1)
    PeakWidthBins,

    /// Total channel width in bins measured from the peak
    /// (range 1-240, default: 1)
    ChanWidthBins,

    /// Lower passband edge, exclusive (range 20-500, default: 20)
    PassbandStartBin,

    /// Upper passband edge, exclusive (range 250-950, default: 250)
    PassbandStopBin,
}

impl ParamId {
    /// All parameters in display order.
    pub const ALL: [ParamId; 6] = [
        ParamId::MedFiltWidth,
        ParamId::PeakCount,
        ParamId::PeakWidthBins,
        ParamId::ChanWidthBins,
        ParamId::PassbandStartBin,
        ParamId::PassbandStopBin,
    ];

    /// Stable snake_case name, as shown to controllers.
    pub fn name(&self) -> &'static str {
        match self {
            ParamId::MedFiltWidth => "med_filt_width",
            ParamId::PeakCount => "peak_count",
            ParamId::PeakWidthBins => "peak_width_bins",
            ParamId::ChanWidthBins => "chan_width_bins",
            ParamId::PassbandStartBin => "passband_start_bin",
            ParamId::PassbandStopBin => "passband_stop_bin",
        }
    }

    /// Look up a parameter by its snake_case name.
    pub fn from_name(name: &str) -> Option<ParamId> {
        ParamId::ALL.iter().copied().find(|id| id.name() == name)
    }
}

/// One adjustable parameter: fixed bounds plus the live value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Smallest accepted value
    pub min: usize,
    /// Largest accepted value
    pub max: usize,
    /// Current value, always within `[min, max]`
    pub current_value: usize,
}

impl Param {
    fn new(min: usize, max: usize) -> Self {
        Self {
            min,
            max,
            current_value: min,
        }
    }
}

/// The complete parameter set of a detector
///
/// Cloning takes a snapshot: a forked detector keeps the values it was
/// forked with and ignores later writes to the original.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSet {
    med_filt_width: Param,
    peak_count: Param,
    peak_width_bins: Param,
    chan_width_bins: Param,
    passband_start_bin: Param,
    passband_stop_bin: Param,
}

impl Default for ParamSet {
    fn default() -> Self {
        Self {
            med_filt_width: Param::new(1, 30),
            peak_count: Param::new(1, 15),
            peak_width_bins: Param::new(1, 60),
            chan_width_bins: Param::new(1, 240),
            passband_start_bin: Param::new(20, 500),
            passband_stop_bin: Param::new(250, 950),
        }
    }
}

impl ParamSet {
    /// Bounds and current value of one parameter.
    pub fn get(&self, id: ParamId) -> Param {
        *self.slot(id)
    }

    /// Current value of one parameter.
    pub fn value(&self, id: ParamId) -> usize {
        self.slot(id).current_value
    }

    /// Set a parameter's value.
    ///
    /// # Errors
    ///
    /// Returns `ChansiftError::ParameterOutOfRange` if `value` falls
    /// outside the parameter's `[min, max]` bounds. The stored value is
    /// unchanged in that case.
    pub fn set_value(&mut self, id: ParamId, value: usize) -> Result<(), ChansiftError> {
        let param = self.slot_mut(id);
        if value < param.min || value > param.max {
            log::warn!(
                "rejected {} = {} (bounds [{}, {}])",
                id.name(),
                value,
                param.min,
                param.max
            );
            return Err(ChansiftError::ParameterOutOfRange(format!(
                "{} = {} is outside [{}, {}]",
                id.name(),
                value,
                param.min,
                param.max
            )));
        }
        param.current_value = value;
        Ok(())
    }

    /// All parameters with their ids, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamId, Param)> + '_ {
        ParamId::ALL.iter().map(move |&id| (id, self.get(id)))
    }

    fn slot(&self, id: ParamId) -> &Param {
        match id {
            ParamId::MedFiltWidth => &self.med_filt_width,
            ParamId::PeakCount => &self.peak_count,
            ParamId::PeakWidthBins => &self.peak_width_bins,
            ParamId::ChanWidthBins => &self.chan_width_bins,
            ParamId::PassbandStartBin => &self.passband_start_bin,
            ParamId::PassbandStopBin => &self.passband_stop_bin,
        }
    }

    fn slot_mut(&mut self, id: ParamId) -> &mut Param {
        match id {
            ParamId::MedFiltWidth => &mut self.med_filt_width,
            ParamId::PeakCount => &mut self.peak_count,
            ParamId::PeakWidthBins => &mut self.peak_width_bins,
            ParamId::ChanWidthBins => &mut self.chan_width_bins,
            ParamId::PassbandStartBin => &mut self.passband_start_bin,
            ParamId::PassbandStopBin => &mut self.passband_stop_bin,
        }
    }
}
