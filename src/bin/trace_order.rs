use echelle_trace::colormap::{Colormap, Normalize, Rgba};
use echelle_trace::config::trace::load_config;
use echelle_trace::image::io::{load_image_f32, save_colormapped_png, write_json_file};
use echelle_trace::overscan::read_overscan;
use echelle_trace::trace::OrderTracer;
use log::{info, warn};
use std::env;
use std::path::Path;

const TRACE_COLOR: Rgba = [255, 215, 0, 255];

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let frame = load_image_f32(&config.input)?;
    info!(
        "loaded {} ({} columns × {} rows)",
        config.input.display(),
        frame.w,
        frame.h
    );

    if let Some(path) = &config.overscan {
        let overscan = read_overscan(path).map_err(|e| e.to_string())?;
        if overscan.length != frame.w as i64 || overscan.width != frame.h as i64 {
            warn!(
                "overscan file describes a {}×{} detector, frame is {}×{}",
                overscan.length, overscan.width, frame.w, frame.h
            );
        }
    }

    let tracer = OrderTracer::new(config.trace.clone());
    let trace = tracer
        .trace(&frame, config.seed_row)
        .map_err(|e| format!("Tracing failed: {e}"))?;

    write_json_file(&config.output.trace_json, &trace)?;
    println!(
        "Traced order from row {} at column {}: {} accepted points, rms {:.3} px",
        config.seed_row,
        config.trace.reference_column,
        trace.accepted.len(),
        trace.report.rms_residual
    );
    println!("Saved trace to {}", config.output.trace_json.display());

    if let Some(path) = &config.output.preview_image {
        let norm = config
            .preview
            .unwrap_or_else(|| Normalize::from_image(&frame));
        save_colormapped_png(
            &frame,
            &Colormap::reds_saturated(),
            norm,
            Some((&trace, TRACE_COLOR)),
            path,
        )?;
        println!("Saved preview to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: trace_order <config.json>".to_string()
}
