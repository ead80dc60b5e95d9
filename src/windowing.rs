//! Cyclic analysis windows over the sample sequence
//!
//! The sample sequence is cut into fixed-stride windows that repeat
//! forever: after the last window the cursor wraps back to the first.
//! Every start offset lies inside the sequence; the final window's end
//! may overhang it, and consumers clamp when slicing.

/// Cyclic cursor over half-open sample windows `[start, end)`
///
/// Window boundaries are the multiples of `step` strictly below
/// `total + step`, paired consecutively. A sequence of `total` samples
/// therefore yields `ceil((total + step) / step) - 1` windows per pass,
/// the last of which covers the tail even when `total` is not a multiple
/// of `step`.
#[derive(Debug, Clone)]
pub struct WindowCursor {
    step: usize,
    windows: usize,
    position: usize,
}

impl WindowCursor {
    /// Create a cursor over `total` samples with the given stride.
    ///
    /// # Arguments
    ///
    /// * `total` - Number of samples in the sequence (must be non-zero)
    /// * `step` - Stride between window starts, also each window's length
    pub fn new(total: usize, step: usize) -> Self {
        debug_assert!(total > 0, "window cursor needs at least one sample");
        debug_assert!(step > 0, "window stride must be non-zero");

        let boundaries = (total + step).div_ceil(step);
        let windows = boundaries.saturating_sub(1).max(1);
        log::debug!(
            "window cursor: {} samples, stride {}, {} windows per pass",
            total,
            step,
            windows
        );

        Self {
            step,
            windows,
            position: 0,
        }
    }

    /// Next window as a half-open `[start, end)` pair, advancing the cursor.
    ///
    /// `start` is always a valid sample offset; `end` may exceed the
    /// sequence length on the last window of a pass.
    pub fn next_window(&mut self) -> (usize, usize) {
        let start = self.position * self.step;
        let end = start + self.step;
        self.position = (self.position + 1) % self.windows;
        (start, end)
    }

    /// Number of windows before the sequence repeats.
    pub fn period(&self) -> usize {
        self.windows
    }

    /// Index of the window the next `next_window` call will yield.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Reset the cursor to the first window.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}
