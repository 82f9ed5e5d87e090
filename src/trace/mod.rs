//! Spectral order tracing.
//!
//! Given a frame and the row of one order at a reference column, the tracer
//! walks the order's ridge outward in both directions (see [`walk`]), then fits
//! a polynomial to the accepted positions and evaluates it at every column.
//!
//! ```no_run
//! use echelle_trace::image::ImageF32;
//! use echelle_trace::trace::{OrderTracer, TraceOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frame = ImageF32::new(2048, 512);
//! let tracer = OrderTracer::new(TraceOptions::default());
//! let trace = tracer.trace(&frame, 241)?;
//! println!("row at column 0: {:.2}", trace.rows[0]);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod options;
pub mod peaks;
pub mod polyfit;
pub mod types;
pub mod walk;

pub use error::TraceError;
pub use options::{PeakSelection, TraceOptions, WindowPolicy};
pub use peaks::{find_local_maxima, select_peak};
pub use polyfit::Polynomial;
pub use types::{OrderTrace, PassReport, StepOutcome, TracePoint, TraceReport, WalkDirection};
pub use walk::{walk_pass, ColumnWalker, PassResult};

use crate::image::ImageView;
use log::{debug, warn};
use rayon::prelude::*;
use std::time::Instant;

/// Traces single orders with a fixed set of options.
#[derive(Clone, Debug, Default)]
pub struct OrderTracer {
    options: TraceOptions,
}

impl OrderTracer {
    pub fn new(options: TraceOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TraceOptions {
        &self.options
    }

    /// Trace the order passing through `seed_row` at the reference column.
    pub fn trace<I>(&self, image: &I, seed_row: usize) -> Result<OrderTrace, TraceError>
    where
        I: ImageView,
        I::Pixel: Into<f32>,
    {
        let t0 = Instant::now();
        let opts = &self.options;
        opts.validate()?;
        let (width, height) = (image.width(), image.height());
        // Under Clip a short frame just gets a clipped window everywhere.
        if opts.window_policy == WindowPolicy::Fail && height < 2 * opts.window_half_width + 1 {
            return Err(TraceError::InvalidOptions {
                reason: "frame has fewer rows than the search window under the fail policy",
            });
        }
        if opts.reference_column >= width || seed_row >= height {
            return Err(TraceError::SeedOutOfBounds {
                column: opts.reference_column,
                row: seed_row,
                width,
                height,
            });
        }

        // Independent cursors: a derailment on one side cannot leak into the other.
        let ascending = walk_pass(image, opts, seed_row, WalkDirection::Ascending)?;
        let descending = walk_pass(image, opts, seed_row, WalkDirection::Descending)?;

        let mut accepted = ascending.points;
        accepted.extend(descending.points);

        let required = opts.min_points();
        if accepted.len() < required {
            warn!(
                "order trace from row {seed_row} at column {}: only {} points accepted, need {required}",
                opts.reference_column,
                accepted.len()
            );
            return Err(TraceError::InsufficientData {
                found: accepted.len(),
                required,
            });
        }

        let xs: Vec<f64> = accepted.iter().map(|p| p.column as f64).collect();
        let ys: Vec<f64> = accepted.iter().map(|p| p.row as f64).collect();
        let domain = (0.0, width.saturating_sub(1) as f64);
        let polynomial = Polynomial::fit(&xs, &ys, opts.poly_degree, domain)?;
        let rms_residual = polynomial.rms_residual(&xs, &ys);

        let columns: Vec<usize> = (0..width).collect();
        let rows: Vec<f64> = columns.iter().map(|&c| polynomial.eval(c as f64)).collect();

        let latency_ms = t0.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "order trace from row {seed_row}: {} points, rms={rms_residual:.3} px, {latency_ms:.3} ms",
            accepted.len()
        );

        Ok(OrderTrace {
            columns,
            rows,
            accepted,
            polynomial,
            report: TraceReport {
                seed_column: opts.reference_column,
                seed_row,
                ascending: ascending.report,
                descending: descending.report,
                rms_residual,
                latency_ms,
            },
        })
    }

    /// Trace several orders concurrently, one result per seed row, in input order.
    pub fn trace_many<I>(&self, image: &I, seed_rows: &[usize]) -> Vec<Result<OrderTrace, TraceError>>
    where
        I: ImageView + Sync,
        I::Pixel: Into<f32>,
    {
        seed_rows
            .par_iter()
            .map(|&row| self.trace(image, row))
            .collect()
    }
}

/// Convenience wrapper around [`OrderTracer::trace`].
pub fn trace_order<I>(
    image: &I,
    seed_row: usize,
    options: &TraceOptions,
) -> Result<OrderTrace, TraceError>
where
    I: ImageView,
    I::Pixel: Into<f32>,
{
    OrderTracer::new(options.clone()).trace(image, seed_row)
}

/// Convenience wrapper around [`OrderTracer::trace_many`].
pub fn trace_orders<I>(
    image: &I,
    seed_rows: &[usize],
    options: &TraceOptions,
) -> Vec<Result<OrderTrace, TraceError>>
where
    I: ImageView + Sync,
    I::Pixel: Into<f32>,
{
    OrderTracer::new(options.clone()).trace_many(image, seed_rows)
}
