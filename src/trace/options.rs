//! Parameters of the order tracer.
//!
//! Defaults reproduce the classic reduction recipe: a ±6 row search window,
//! seed at column 1000, steps of at most one pixel between accepted columns,
//! and a quartic trace model.

use super::error::TraceError;
use serde::{Deserialize, Serialize};

/// Which local maximum of a search window becomes the candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakSelection {
    /// Lowest row among the maxima in the window.
    #[default]
    First,
    /// Maximum closest to the cursor row; ties go to the lower row.
    Nearest,
}

/// What to do when the search window reaches past the first or last row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPolicy {
    /// Shrink the window to the rows that exist.
    #[default]
    Clip,
    /// Abort the trace with [`TraceError::OutOfBounds`].
    Fail,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceOptions {
    /// Half-width `w` of the row window; `2w + 1` rows are inspected.
    pub window_half_width: usize,
    /// Column at which the seed row is known.
    pub reference_column: usize,
    /// A candidate is accepted when it lies strictly closer than this many
    /// rows to the cursor.
    pub max_step: usize,
    /// Degree of the column → row polynomial.
    pub poly_degree: usize,
    pub peak_selection: PeakSelection,
    pub window_policy: WindowPolicy,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            window_half_width: 6,
            reference_column: 1000,
            max_step: 2,
            poly_degree: 4,
            peak_selection: PeakSelection::First,
            window_policy: WindowPolicy::Clip,
        }
    }
}

impl TraceOptions {
    pub fn with_reference_column(mut self, column: usize) -> Self {
        self.reference_column = column;
        self
    }

    pub fn with_window_half_width(mut self, half_width: usize) -> Self {
        self.window_half_width = half_width;
        self
    }

    pub fn with_peak_selection(mut self, selection: PeakSelection) -> Self {
        self.peak_selection = selection;
        self
    }

    pub fn with_window_policy(mut self, policy: WindowPolicy) -> Self {
        self.window_policy = policy;
        self
    }

    /// Minimum number of accepted points needed by the fit.
    pub fn min_points(&self) -> usize {
        self.poly_degree + 1
    }

    pub fn validate(&self) -> Result<(), TraceError> {
        if self.window_half_width == 0 {
            return Err(TraceError::InvalidOptions {
                reason: "window_half_width must be at least 1",
            });
        }
        if self.max_step == 0 {
            return Err(TraceError::InvalidOptions {
                reason: "max_step must be at least 1",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let opts: TraceOptions =
            serde_json::from_str(r#"{ "reference_column": 512, "peak_selection": "nearest" }"#)
                .unwrap();
        assert_eq!(opts.reference_column, 512);
        assert_eq!(opts.peak_selection, PeakSelection::Nearest);
        assert_eq!(opts.window_half_width, 6);
        assert_eq!(opts.poly_degree, 4);
        assert_eq!(opts.window_policy, WindowPolicy::Clip);
    }

    #[test]
    fn zero_window_is_rejected() {
        let opts = TraceOptions::default().with_window_half_width(0);
        assert!(matches!(
            opts.validate(),
            Err(TraceError::InvalidOptions { .. })
        ));
    }
}
