//! Greedy column-by-column ridge walk.
//!
//! The walker keeps a single cursor row. Each step looks at `2w + 1` rows of
//! one column centred on the cursor, picks a local maximum, and moves the
//! cursor only when the maximum is within `max_step` rows of it. Columns with
//! no maximum or with a distant one are skipped and leave the cursor alone.

use super::error::TraceError;
use super::options::{TraceOptions, WindowPolicy};
use super::peaks::{find_local_maxima, select_peak};
use super::types::{PassReport, StepOutcome, TracePoint, WalkDirection};
use crate::image::ImageView;
use log::debug;

pub struct ColumnWalker<'a, I: ImageView> {
    image: &'a I,
    options: &'a TraceOptions,
    cursor: usize,
    profile: Vec<f32>,
}

impl<'a, I> ColumnWalker<'a, I>
where
    I: ImageView,
    I::Pixel: Into<f32>,
{
    /// `seed_row` must lie inside the frame.
    pub fn new(image: &'a I, options: &'a TraceOptions, seed_row: usize) -> Self {
        debug_assert!(seed_row < image.height());
        Self {
            image,
            options,
            cursor: seed_row,
            profile: Vec::with_capacity(2 * options.window_half_width + 1),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Half-open row range `[start, end)` searched at `column`.
    fn window(&self, column: usize) -> Result<(usize, usize), TraceError> {
        let rows = self.image.height();
        let w = self.options.window_half_width;
        let lo = self.cursor as isize - w as isize;
        let hi = (self.cursor + w) as isize;
        if (lo < 0 || hi >= rows as isize) && self.options.window_policy == WindowPolicy::Fail {
            return Err(TraceError::OutOfBounds {
                column,
                row_start: lo,
                row_end: hi,
                rows,
            });
        }
        let start = lo.max(0) as usize;
        let end = (hi as usize + 1).min(rows);
        Ok((start, end))
    }

    /// Inspect `column` and update the cursor on acceptance.
    pub fn step(&mut self, column: usize) -> Result<StepOutcome, TraceError> {
        let (start, end) = self.window(column)?;
        self.image
            .column_segment_into(column, start, end, &mut self.profile);
        let peaks = find_local_maxima(&self.profile);
        let Some(local) = select_peak(&peaks, self.cursor - start, self.options.peak_selection)
        else {
            return Ok(StepOutcome::NoPeak);
        };
        let candidate = start + local;
        if candidate.abs_diff(self.cursor) < self.options.max_step {
            self.cursor = candidate;
            Ok(StepOutcome::Accepted { row: candidate })
        } else {
            Ok(StepOutcome::Rejected { candidate })
        }
    }
}

/// Accepted points and statistics of one pass.
#[derive(Clone, Debug)]
pub struct PassResult {
    pub points: Vec<TracePoint>,
    pub report: PassReport,
}

/// Walk one direction from the seed with a fresh cursor.
///
/// Requires `options.reference_column < image.width()` and
/// `seed_row < image.height()`.
pub fn walk_pass<I>(
    image: &I,
    options: &TraceOptions,
    seed_row: usize,
    direction: WalkDirection,
) -> Result<PassResult, TraceError>
where
    I: ImageView,
    I::Pixel: Into<f32>,
{
    let reference = options.reference_column;
    let width = image.width();
    let mut walker = ColumnWalker::new(image, options, seed_row);
    let mut points = Vec::new();
    let mut report = PassReport::new(direction, seed_row);

    let mut visit = |column: usize| -> Result<(), TraceError> {
        let outcome = walker.step(column)?;
        if let StepOutcome::Accepted { row } = outcome {
            points.push(TracePoint { column, row });
        }
        report.record(outcome);
        Ok(())
    };
    match direction {
        WalkDirection::Ascending => (reference..width).try_for_each(&mut visit)?,
        WalkDirection::Descending => (1..reference).rev().try_for_each(&mut visit)?,
    }

    debug!(
        "order walk {:?}: visited={} accepted={} no_peak={} rejected={} final_row={}",
        direction, report.visited, report.accepted, report.no_peak, report.rejected, report.final_row
    );
    Ok(PassResult { points, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageF32;
    use crate::trace::options::PeakSelection;

    fn ridge_image(width: usize, height: usize, row: usize) -> ImageF32 {
        let mut img = ImageF32::new(width, height);
        for x in 0..width {
            img.set(x, row - 1, 40.0);
            img.set(x, row, 100.0);
            img.set(x, row + 1, 40.0);
        }
        img
    }

    #[test]
    fn step_accepts_small_moves_and_updates_cursor() {
        let mut img = ridge_image(4, 30, 15);
        img.set(2, 15, 0.0);
        img.set(2, 14, 0.0);
        img.set(2, 16, 100.0);
        img.set(2, 17, 40.0);
        let opts = TraceOptions::default();
        let mut walker = ColumnWalker::new(&img, &opts, 15);
        assert_eq!(walker.step(1).unwrap(), StepOutcome::Accepted { row: 15 });
        assert_eq!(walker.step(2).unwrap(), StepOutcome::Accepted { row: 16 });
        assert_eq!(walker.cursor(), 16);
    }

    #[test]
    fn distant_peak_is_rejected_without_moving_cursor() {
        let mut img = ImageF32::new(3, 30);
        img.set(1, 10, 50.0);
        let opts = TraceOptions::default();
        let mut walker = ColumnWalker::new(&img, &opts, 15);
        assert_eq!(
            walker.step(1).unwrap(),
            StepOutcome::Rejected { candidate: 10 }
        );
        assert_eq!(walker.cursor(), 15);
        assert_eq!(walker.step(0).unwrap(), StepOutcome::NoPeak);
        assert_eq!(walker.cursor(), 15);
    }

    #[test]
    fn first_policy_prefers_lower_row_over_nearer_one() {
        let mut img = ImageF32::new(1, 30);
        img.set(0, 10, 50.0);
        img.set(0, 15, 50.0);
        let first = TraceOptions::default();
        let mut walker = ColumnWalker::new(&img, &first, 15);
        assert_eq!(
            walker.step(0).unwrap(),
            StepOutcome::Rejected { candidate: 10 }
        );

        let nearest = TraceOptions::default().with_peak_selection(PeakSelection::Nearest);
        let mut walker = ColumnWalker::new(&img, &nearest, 15);
        assert_eq!(walker.step(0).unwrap(), StepOutcome::Accepted { row: 15 });
    }

    #[test]
    fn window_is_clipped_near_first_row() {
        let img = ridge_image(2, 20, 1);
        let opts = TraceOptions::default();
        let mut walker = ColumnWalker::new(&img, &opts, 2);
        assert_eq!(walker.step(0).unwrap(), StepOutcome::Accepted { row: 1 });
    }

    #[test]
    fn fail_policy_reports_out_of_bounds() {
        let img = ridge_image(2, 20, 1);
        let opts = TraceOptions::default().with_window_policy(WindowPolicy::Fail);
        let mut walker = ColumnWalker::new(&img, &opts, 2);
        assert_eq!(
            walker.step(0),
            Err(TraceError::OutOfBounds {
                column: 0,
                row_start: -4,
                row_end: 8,
                rows: 20,
            })
        );
    }

    #[test]
    fn descending_pass_stops_before_column_zero() {
        let img = ridge_image(10, 20, 8);
        let opts = TraceOptions::default().with_reference_column(5);
        let pass = walk_pass(&img, &opts, 8, WalkDirection::Descending).unwrap();
        let columns: Vec<usize> = pass.points.iter().map(|p| p.column).collect();
        assert_eq!(columns, vec![4, 3, 2, 1]);
        assert_eq!(pass.report.visited, 4);

        let pass = walk_pass(&img, &opts, 8, WalkDirection::Ascending).unwrap();
        let columns: Vec<usize> = pass.points.iter().map(|p| p.column).collect();
        assert_eq!(columns, vec![5, 6, 7, 8, 9]);
    }
}
