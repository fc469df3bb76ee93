#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Bgr8,
    Rgba8,
    Bgra8,
    Mono8,
}

impl PixelFormat {
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Rgb8 | PixelFormat::Bgr8 => 3,
            PixelFormat::Rgba8 | PixelFormat::Bgra8 => 4,
            PixelFormat::Mono8 => 1,
        }
    }

    pub fn has_alpha(&self) -> bool {
        self.channels() == 4
    }

    /// The same channel order with the alpha channel removed.
    pub fn without_alpha(&self) -> Self {
        match self {
            PixelFormat::Rgba8 => PixelFormat::Rgb8,
            PixelFormat::Bgra8 => PixelFormat::Bgr8,
            other => *other,
        }
    }

    /// Byte offsets of the red, green and blue samples inside one pixel.
    pub fn rgb_offsets(&self) -> [usize; 3] {
        match self {
            PixelFormat::Rgb8 | PixelFormat::Rgba8 => [0, 1, 2],
            PixelFormat::Bgr8 | PixelFormat::Bgra8 => [2, 1, 0],
            PixelFormat::Mono8 => [0, 0, 0],
        }
    }

    pub fn ensure_format(&self, expected: PixelFormat) -> Result<(), crate::ImageError> {
        if *self != expected {
            return Err(crate::ImageError::Format(format!(
                "expected {:?} format, got {:?}",
                expected, self
            )));
        }
        Ok(())
    }
}
