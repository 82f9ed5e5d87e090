use super::polyfit::Polynomial;
use serde::Serialize;

/// Accepted ridge position at one column (integer pixel row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TracePoint {
    pub column: usize,
    pub row: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkDirection {
    /// Reference column up to the last column.
    Ascending,
    /// Reference column − 1 down to column 1.
    Descending,
}

/// Result of inspecting one column during a walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A peak close enough to the cursor was found; the cursor moved to `row`.
    Accepted { row: usize },
    /// The window holds no local maximum.
    NoPeak,
    /// The selected maximum was too far from the cursor.
    Rejected { candidate: usize },
}

/// Per-pass bookkeeping.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassReport {
    pub direction: WalkDirection,
    pub visited: usize,
    pub accepted: usize,
    pub no_peak: usize,
    pub rejected: usize,
    /// Cursor row after the last visited column.
    pub final_row: usize,
}

impl PassReport {
    pub(crate) fn new(direction: WalkDirection, seed_row: usize) -> Self {
        Self {
            direction,
            visited: 0,
            accepted: 0,
            no_peak: 0,
            rejected: 0,
            final_row: seed_row,
        }
    }

    pub(crate) fn record(&mut self, outcome: StepOutcome) {
        self.visited += 1;
        match outcome {
            StepOutcome::Accepted { row } => {
                self.accepted += 1;
                self.final_row = row;
            }
            StepOutcome::NoPeak => self.no_peak += 1,
            StepOutcome::Rejected { .. } => self.rejected += 1,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceReport {
    pub seed_column: usize,
    pub seed_row: usize,
    pub ascending: PassReport,
    pub descending: PassReport,
    /// Root-mean-square distance between accepted rows and the fitted curve.
    pub rms_residual: f64,
    pub latency_ms: f64,
}

/// Continuous trace of one order.
///
/// `columns` is always `0..width` and `rows[i]` is the fitted row at
/// `columns[i]`, whether or not a raw peak was accepted there.
///
/// Only `columns`, `rows`, `accepted` and `polynomial` are reproducible
/// across runs; `report.latency_ms` is wall-clock time.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTrace {
    pub columns: Vec<usize>,
    pub rows: Vec<f64>,
    pub accepted: Vec<TracePoint>,
    pub polynomial: Polynomial,
    pub report: TraceReport,
}

impl OrderTrace {
    /// Fitted row at `column`, `None` outside the frame.
    pub fn row_at(&self, column: usize) -> Option<f64> {
        self.rows.get(column).copied()
    }

    pub fn is_accepted(&self, column: usize) -> bool {
        self.accepted.iter().any(|p| p.column == column)
    }
}
