//! Spectral transform and baseline removal
//!
//! One analysis window of samples becomes a magnitude half-spectrum
//! ([`transform`]), which is then whitened by subtracting a median-filter
//! baseline ([`baseline`]). Everything downstream of this module works on
//! the whitened residual.

pub mod baseline;
pub mod transform;
