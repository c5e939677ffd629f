//! Adaptive moving average.

use crate::numeric::mean;

/// Moving average whose window adapts to the series length.
///
/// The window is half the series length, capped at `max_window` and never
/// below one. Early points average everything so far, late points average
/// everything remaining, and the rest use the trailing window, so the output
/// is as long as the input.
#[derive(Clone, Copy, Debug)]
pub struct Smoother {
    max_window: usize,
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Smoother {
    /// Creates a smoother with the given window cap.
    #[must_use]
    pub const fn new(max_window: usize) -> Self {
        Self { max_window }
    }

    /// Window used for a series of `len` values.
    #[must_use]
    pub fn window(&self, len: usize) -> usize {
        (len / 2).min(self.max_window).max(1)
    }

    /// Smooths `values`.
    #[must_use]
    pub fn smooth(&self, values: &[f64]) -> Vec<f64> {
        let n = values.len();
        let window = self.window(n);

        (0..n)
            .map(|i| {
                let slice = if i + 1 < window {
                    &values[..=i]
                } else if i + window > n {
                    &values[i..]
                } else {
                    &values[i + 1 - window..=i]
                };
                mean(slice).unwrap_or(values[i])
            })
            .collect()
    }
}
