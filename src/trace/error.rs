/// Fatal conditions raised by the order tracer.
///
/// Columns without a usable peak are not errors; they show up as
/// [`StepOutcome`](super::StepOutcome) values and in the pass reports.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceError {
    InvalidOptions {
        reason: &'static str,
    },
    /// The seed lies outside the frame.
    SeedOutOfBounds {
        column: usize,
        row: usize,
        width: usize,
        height: usize,
    },
    /// The search window left the frame under [`WindowPolicy::Fail`](super::WindowPolicy::Fail).
    OutOfBounds {
        column: usize,
        row_start: isize,
        row_end: isize,
        rows: usize,
    },
    InsufficientData {
        found: usize,
        required: usize,
    },
    SingularFit {
        points: usize,
        degree: usize,
    },
}

impl std::fmt::Display for TraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceError::InvalidOptions { reason } => write!(f, "invalid trace options: {reason}"),
            TraceError::SeedOutOfBounds {
                column,
                row,
                width,
                height,
            } => write!(
                f,
                "seed (column {column}, row {row}) outside {width}×{height} frame"
            ),
            TraceError::OutOfBounds {
                column,
                row_start,
                row_end,
                rows,
            } => write!(
                f,
                "search window rows {row_start}..={row_end} at column {column} exceed frame rows 0..{rows}"
            ),
            TraceError::InsufficientData { found, required } => {
                write!(f, "insufficient trace points ({found} < {required})")
            }
            TraceError::SingularFit { points, degree } => write!(
                f,
                "degree-{degree} fit over {points} points is rank deficient"
            ),
        }
    }
}

impl std::error::Error for TraceError {}
