//! Colour mapping of detector frames for quick-look previews.
//!
//! A sequential red scale with three sentinel colours: masked or NaN pixels,
//! values above the display range, and values below it. Sentinels follow the
//! CSS named colours.

use crate::image::ImageView;
use serde::{Deserialize, Serialize};

pub type Rgba = [u8; 4];

pub const PURPLE: Rgba = [128, 0, 128, 255];
pub const GREEN: Rgba = [0, 128, 0, 255];
pub const BLUE: Rgba = [0, 0, 255, 255];

/// Nine-step ColorBrewer "Reds", light to dark.
const REDS: [[u8; 3]; 9] = [
    [255, 245, 240],
    [254, 224, 210],
    [252, 187, 161],
    [252, 146, 114],
    [251, 106, 74],
    [239, 59, 44],
    [203, 24, 29],
    [165, 15, 21],
    [103, 0, 13],
];

/// Linear display range `[vmin, vmax]`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Normalize {
    pub vmin: f32,
    pub vmax: f32,
}

impl Normalize {
    pub fn new(vmin: f32, vmax: f32) -> Self {
        Self { vmin, vmax }
    }

    /// Full finite range of `image`, or `[0, 1]` when it has none.
    pub fn from_image(image: &crate::image::ImageF32) -> Self {
        let (vmin, vmax) = image.finite_range().unwrap_or((0.0, 1.0));
        Self { vmin, vmax }
    }

    /// Position of `v` in the range; values outside map outside `[0, 1]`.
    /// A degenerate range maps everything to 0.
    fn scale(&self, v: f32) -> f32 {
        let span = self.vmax - self.vmin;
        if span > 0.0 {
            (v - self.vmin) / span
        } else {
            0.0
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    anchors: &'static [[u8; 3]],
    bad: Rgba,
    over: Option<Rgba>,
    under: Option<Rgba>,
}

impl Colormap {
    /// Red scale, masked pixels in purple. Out-of-range values clamp to the
    /// end colours.
    pub fn reds() -> Self {
        Self {
            anchors: &REDS,
            bad: PURPLE,
            over: None,
            under: None,
        }
    }

    /// Red scale with saturation markers: masked in purple, above `vmax` in
    /// green, below `vmin` in blue.
    pub fn reds_saturated() -> Self {
        Self::reds().with_over(GREEN).with_under(BLUE)
    }

    pub fn with_bad(mut self, color: Rgba) -> Self {
        self.bad = color;
        self
    }

    pub fn with_over(mut self, color: Rgba) -> Self {
        self.over = Some(color);
        self
    }

    pub fn with_under(mut self, color: Rgba) -> Self {
        self.under = Some(color);
        self
    }

    pub fn bad(&self) -> Rgba {
        self.bad
    }

    /// Colour for `value`; NaN counts as masked.
    pub fn map(&self, value: f32, norm: Normalize) -> Rgba {
        if value.is_nan() {
            return self.bad;
        }
        let t = norm.scale(value);
        if t > 1.0 {
            return self.over.unwrap_or_else(|| self.sample(1.0));
        }
        if t < 0.0 {
            return self.under.unwrap_or_else(|| self.sample(0.0));
        }
        self.sample(t)
    }

    pub fn map_masked(&self, value: f32, masked: bool, norm: Normalize) -> Rgba {
        if masked {
            self.bad
        } else {
            self.map(value, norm)
        }
    }

    /// Piecewise-linear interpolation between the anchors, `t ∈ [0, 1]`.
    fn sample(&self, t: f32) -> Rgba {
        let last = self.anchors.len() - 1;
        let pos = t.clamp(0.0, 1.0) * last as f32;
        let i = (pos.floor() as usize).min(last - 1);
        let frac = pos - i as f32;
        let (a, b) = (self.anchors[i], self.anchors[i + 1]);
        let lerp = |k: usize| (a[k] as f32 + frac * (b[k] as f32 - a[k] as f32)).round() as u8;
        [lerp(0), lerp(1), lerp(2), 255]
    }
}

/// Map every pixel of `image` to RGBA, row-major, 4 bytes per pixel.
///
/// `mask`, when given, must hold one flag per pixel (row-major); `true` marks
/// the pixel as bad.
///
/// # Panics
///
/// If `mask` is given and its length differs from `width * height`.
pub fn render_rgba<I>(image: &I, cmap: &Colormap, norm: Normalize, mask: Option<&[bool]>) -> Vec<u8>
where
    I: ImageView<Pixel = f32>,
{
    let w = image.width();
    if let Some(m) = mask {
        assert_eq!(
            m.len(),
            w * image.height(),
            "mask must hold one flag per pixel"
        );
    }
    let mut out = Vec::with_capacity(w * image.height() * 4);
    for (y, row) in image.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            let masked = mask.is_some_and(|m| m[y * w + x]);
            out.extend_from_slice(&cmap.map_masked(v, masked, norm));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageF32;

    #[test]
    fn range_ends_hit_anchor_colours() {
        let cmap = Colormap::reds();
        let norm = Normalize::new(0.0, 100.0);
        assert_eq!(cmap.map(0.0, norm), [255, 245, 240, 255]);
        assert_eq!(cmap.map(100.0, norm), [103, 0, 13, 255]);
        assert_eq!(cmap.map(50.0, norm), [251, 106, 74, 255]);
    }

    #[test]
    fn plain_reds_clamps_and_marks_nan_purple() {
        let cmap = Colormap::reds();
        let norm = Normalize::new(0.0, 1.0);
        assert_eq!(cmap.map(5.0, norm), cmap.map(1.0, norm));
        assert_eq!(cmap.map(-5.0, norm), cmap.map(0.0, norm));
        assert_eq!(cmap.map(f32::NAN, norm), PURPLE);
    }

    #[test]
    fn saturated_reds_uses_sentinels() {
        let cmap = Colormap::reds_saturated();
        let norm = Normalize::new(10.0, 20.0);
        assert_eq!(cmap.map(25.0, norm), GREEN);
        assert_eq!(cmap.map(5.0, norm), BLUE);
        assert_eq!(cmap.map_masked(15.0, true, norm), PURPLE);
        assert_ne!(cmap.map(15.0, norm), GREEN);
    }

    #[test]
    fn render_honours_mask() {
        let img = ImageF32::from_vec(2, 1, vec![0.0, 1.0]).unwrap();
        let rgba = render_rgba(
            &img,
            &Colormap::reds(),
            Normalize::new(0.0, 1.0),
            Some(&[false, true][..]),
        );
        assert_eq!(rgba.len(), 8);
        assert_eq!(&rgba[0..4], &[255, 245, 240, 255]);
        assert_eq!(&rgba[4..8], &PURPLE);
    }

    #[test]
    #[should_panic(expected = "mask must hold one flag per pixel")]
    fn render_rejects_short_mask() {
        let img = ImageF32::new(3, 2);
        render_rgba(
            &img,
            &Colormap::reds(),
            Normalize::new(0.0, 1.0),
            Some(&[false; 4][..]),
        );
    }
}
