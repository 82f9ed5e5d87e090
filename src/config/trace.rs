use crate::colormap::Normalize;
use crate::trace::TraceOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config of the `trace_order` tool.
///
/// ```json
/// {
///   "input": "frames/flat_0001.tiff",
///   "seed_row": 241,
///   "trace": { "reference_column": 1000, "window_half_width": 6 },
///   "overscan": "01-CalibrationMasters/overscan.dat",
///   "output": { "trace_json": "out/trace.json", "preview_image": "out/trace.png" }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct TraceToolConfig {
    pub input: PathBuf,
    pub seed_row: usize,
    #[serde(default)]
    pub trace: TraceOptions,
    /// Overscan file used to check the frame size.
    #[serde(default)]
    pub overscan: Option<PathBuf>,
    /// Display range of the preview; the full frame range when absent.
    #[serde(default)]
    pub preview: Option<Normalize>,
    pub output: TraceOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct TraceOutputConfig {
    pub trace_json: PathBuf,
    #[serde(default)]
    pub preview_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<TraceToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
