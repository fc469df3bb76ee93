use {
    crate::{ImageError, PixelFormat},
    base::Vec2,
};

/// Interleaved 8-bit image.
///
/// Rows are `stride` bytes apart; only the first `width * channels` bytes of
/// each row are pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub size: Vec2<usize>,
    pub stride: usize,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl Image {
    /// Create a contiguous image. `data` must hold `width * height * channels` bytes.
    pub fn new(size: Vec2<usize>, data: Vec<u8>, format: PixelFormat) -> Self {
        Self {
            size,
            stride: size.x * format.channels(),
            format,
            data,
        }
    }

    /// Create an image whose rows may carry trailing padding.
    pub fn with_stride(
        size: Vec2<usize>,
        stride: usize,
        data: Vec<u8>,
        format: PixelFormat,
    ) -> Result<Self, ImageError> {
        let row_len = size.x * format.channels();
        if stride < row_len {
            return Err(ImageError::Layout(format!(
                "stride {} is shorter than a {}-pixel {:?} row ({} bytes)",
                stride, size.x, format, row_len
            )));
        }
        let needed = stride * size.y;
        if data.len() < needed {
            return Err(ImageError::Layout(format!(
                "buffer holds {} bytes, {} rows of stride {} need {}",
                data.len(),
                size.y,
                stride,
                needed
            )));
        }
        Ok(Self {
            size,
            stride,
            format,
            data,
        })
    }

    /// Solid-colour contiguous image, mostly useful for synthetic frames.
    pub fn filled(size: Vec2<usize>, format: PixelFormat, pixel: &[u8]) -> Self {
        debug_assert_eq!(pixel.len(), format.channels());
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(size.area() * format.channels())
            .collect();
        Self::new(size, data, format)
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Bytes of pixel data per row, excluding padding.
    pub fn row_len(&self) -> usize {
        self.size.x * self.channels()
    }

    /// No pixels or no backing data.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty() || self.data.is_empty()
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.row_len() && self.data.len() == self.row_len() * self.size.y
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.row_len()]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.size.y).map(move |y| self.row(y))
    }

    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let c = self.channels();
        &self.row(y)[x * c..(x + 1) * c]
    }
}
