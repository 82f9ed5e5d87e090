/// Read-only access to a single-channel, row-major detector frame.
///
/// Rows run along the cross-dispersion axis, columns along the dispersion
/// axis. Implementors only need to provide the dimensions and row slices.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    /// Pixel at column `x`, row `y`, or `None` outside the frame.
    fn get_checked(&self, x: usize, y: usize) -> Option<Self::Pixel> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.row(y)[x])
    }

    /// Copy rows `y0..y1` of column `x` into `out`, converting to `f32`.
    ///
    /// `out` is cleared first. Callers are responsible for keeping the range
    /// inside the frame.
    fn column_segment_into(&self, x: usize, y0: usize, y1: usize, out: &mut Vec<f32>)
    where
        Self::Pixel: Into<f32>,
    {
        out.clear();
        out.extend((y0..y1).map(|y| self.row(y)[x].into()));
    }

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    fn as_slice(&self) -> Option<&[Self::Pixel]> {
        None
    }
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}
