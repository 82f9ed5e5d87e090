//! Tracing of spectral orders on echelle spectrograph frames.
//!
//! The core is [`trace::OrderTracer`]: starting from a known row at a
//! reference column it follows an order's intensity ridge across the detector
//! and fits a polynomial trace evaluated at every column. Around it sit small
//! utilities used by a reduction run: overscan bookkeeping, quick-look
//! colormaps, and image/JSON I/O.

// Public modules
pub mod colormap;
pub mod config;
pub mod image;
pub mod overscan;
pub mod trace;

// --- High-level re-exports -------------------------------------------------

pub use crate::image::ImageF32;
pub use crate::overscan::{read_overscan, write_overscan, OverscanParams};
pub use crate::trace::{trace_order, trace_orders, OrderTrace, OrderTracer, TraceError, TraceOptions};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use echelle_trace::prelude::*;
///
/// # fn main() {
/// let frame = ImageF32::new(2048, 512);
/// let tracer = OrderTracer::new(TraceOptions {
///     reference_column: 1024,
///     ..Default::default()
/// });
///
/// match tracer.trace(&frame, 200) {
///     Ok(trace) => println!("rms={:.3} px", trace.report.rms_residual),
///     Err(err) => eprintln!("trace failed: {err}"),
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageF32, ImageView};
    pub use crate::trace::{OrderTrace, OrderTracer, TraceError, TraceOptions};
}
