//! Owned single-channel f32 frame in row-major layout (stride == width).
//!
//! This is the working representation of a detector frame: `w` columns along
//! the dispersion axis, `h` rows along the cross-dispersion axis, raw counts
//! stored as `f32`.
#[derive(Clone, Debug)]
pub struct ImageF32 {
    /// Number of columns (dispersion direction)
    pub w: usize,
    /// Number of rows (cross-dispersion direction)
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized frame of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Wrap an existing row-major buffer. Returns `None` when the length does
    /// not match `w * h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> Option<Self> {
        (data.len() == w * h).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Overwrite every row of column `x` with `v`.
    pub fn fill_column(&mut self, x: usize, v: f32) {
        for y in 0..self.h {
            self.set(x, y, v);
        }
    }

    /// Minimum and maximum finite pixel value, `None` for an empty or all-NaN
    /// frame.
    pub fn finite_range(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

impl crate::image::traits::ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageView;

    #[test]
    fn column_segment_reads_rows_in_order() {
        let mut img = ImageF32::new(3, 5);
        for y in 0..5 {
            img.set(1, y, y as f32 * 10.0);
        }
        let mut buf = Vec::new();
        img.column_segment_into(1, 1, 4, &mut buf);
        assert_eq!(buf, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn checked_access_outside_frame_is_none() {
        let img = ImageF32::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(img.get_checked(1, 1), Some(4.0));
        assert_eq!(img.get_checked(2, 0), None);
        assert_eq!(img.get_checked(0, 2), None);
    }

    #[test]
    fn from_vec_rejects_mismatched_length() {
        assert!(ImageF32::from_vec(4, 4, vec![0.0; 15]).is_none());
        assert!(ImageF32::from_vec(4, 4, vec![0.0; 16]).is_some());
    }

    #[test]
    fn finite_range_skips_nan() {
        let img = ImageF32::from_vec(2, 2, vec![f32::NAN, 3.0, -1.0, 2.0]).unwrap();
        assert_eq!(img.finite_range(), Some((-1.0, 3.0)));
        assert_eq!(ImageF32::new(0, 0).finite_range(), None);
    }
}
