//! I/O helpers for detector frames and JSON reports.
//!
//! - `load_image_f32`: read a PNG/TIFF frame into an `ImageF32` of raw counts.
//! - `save_colormapped_png`: render a frame through a colormap, optionally
//!   drawing a fitted order trace on top.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ImageF32;
use crate::colormap::{render_rgba, Colormap, Normalize, Rgba};
use crate::trace::OrderTrace;
use image::RgbaImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load a frame from disk as 16-bit luminance, keeping the count values.
///
/// 8-bit files are widened by the `image` crate (0..255 → 0..65535).
pub fn load_image_f32(path: &Path) -> Result<ImageF32, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma16();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw().into_iter().map(f32::from).collect();
    ImageF32::from_vec(width, height, data)
        .ok_or_else(|| format!("Unexpected buffer size for {}", path.display()))
}

/// Save `image` as an RGBA PNG through `cmap`. Pixels along `trace` (one per
/// column, at the rounded fitted row) are painted with `trace_color`.
pub fn save_colormapped_png(
    image: &ImageF32,
    cmap: &Colormap,
    norm: Normalize,
    trace: Option<(&OrderTrace, Rgba)>,
    path: &Path,
) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let rgba = render_rgba(image, cmap, norm, None);
    let mut out = RgbaImage::from_raw(image.w as u32, image.h as u32, rgba)
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    if let Some((trace, color)) = trace {
        for (&x, &row) in trace.columns.iter().zip(&trace.rows) {
            let y = row.round();
            if x < image.w && y >= 0.0 && (y as usize) < image.h {
                out.put_pixel(x as u32, y as u32, image::Rgba(color));
            }
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
