use echelle_trace::image::ImageF32;

/// Renders one order as a Gaussian cross-dispersion profile around
/// `centre(column)` on a zero background.
pub fn gaussian_order<F>(width: usize, height: usize, sigma: f32, amplitude: f32, centre: F) -> ImageF32
where
    F: Fn(usize) -> f32,
{
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(sigma > 0.0, "sigma must be positive");

    let mut img = ImageF32::new(width, height);
    let inv = 1.0 / (2.0 * sigma * sigma);
    for x in 0..width {
        let c = centre(x);
        for y in 0..height {
            let d = y as f32 - c;
            img.set(x, y, amplitude * (-d * d * inv).exp());
        }
    }
    img
}
