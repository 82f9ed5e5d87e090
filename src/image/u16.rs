/// Borrowed 16-bit raw frame, the native output of most CCD controllers.
#[derive(Clone, Copy, Debug)]
pub struct ImageU16<'a> {
    pub w: usize,
    pub h: usize,
    /// Elements between the starts of consecutive rows (>= `w`).
    pub stride: usize,
    pub data: &'a [u16],
}

impl<'a> ImageU16<'a> {
    /// Tightly packed view over `data`; `None` when `data` is too short.
    pub fn from_slice(w: usize, h: usize, data: &'a [u16]) -> Option<Self> {
        (data.len() >= w * h).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.data[y * self.stride + x]
    }
}

impl<'a> crate::image::traits::ImageView for ImageU16<'a> {
    type Pixel = u16;

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
    fn row(&self, y: usize) -> &[u16] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u16]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}
