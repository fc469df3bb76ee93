use crate::{Image, PixelFormat};

impl Image {
    /// Drop the fourth channel of RGBA/BGRA images, keeping the remaining
    /// channel order. Other formats are returned unchanged.
    ///
    /// The result is always contiguous when a channel was dropped.
    pub fn strip_alpha(self) -> Image {
        if !self.format.has_alpha() {
            return self;
        }

        let mut data = Vec::with_capacity(self.size.area() * 3);
        for row in self.rows() {
            for pixel in row.chunks_exact(4) {
                data.extend_from_slice(&pixel[..3]);
            }
        }

        Image::new(self.size, data, self.format.without_alpha())
    }

    /// Repack rows so that `stride == width * channels` and no bytes trail
    /// the last row.
    pub fn into_contiguous(mut self) -> Image {
        if self.is_contiguous() {
            return self;
        }

        let row_len = self.row_len();
        if self.stride == row_len {
            // only trailing bytes past the last row
            self.data.truncate(row_len * self.size.y);
            return self;
        }

        let mut data = Vec::with_capacity(row_len * self.size.y);
        for row in self.rows() {
            data.extend_from_slice(row);
        }
        Image::new(self.size, data, self.format)
    }

    /// Convert into another pixel format. Colour is reduced to gray with
    /// BT.601 weights; alpha becomes opaque when added.
    pub fn to_format(&self, format: PixelFormat) -> Image {
        if format == self.format {
            return self.clone().into_contiguous();
        }

        let src = self.format.rgb_offsets();
        let dst = format.rgb_offsets();
        let src_channels = self.channels();
        let dst_channels = format.channels();

        let mut data = vec![0u8; self.size.area() * dst_channels];
        let mut out = data.chunks_exact_mut(dst_channels);
        for row in self.rows() {
            for pixel in row.chunks_exact(src_channels) {
                let (r, g, b) = (pixel[src[0]], pixel[src[1]], pixel[src[2]]);
                let alpha = if self.format.has_alpha() { pixel[3] } else { 0xFF };
                let Some(target) = out.next() else { break };
                if format == PixelFormat::Mono8 {
                    target[0] = luma(r, g, b);
                } else {
                    target[dst[0]] = r;
                    target[dst[1]] = g;
                    target[dst[2]] = b;
                    if format.has_alpha() {
                        target[3] = alpha;
                    }
                }
            }
        }

        Image::new(self.size, data, format)
    }
}

// BT.601 luma, fixed point shift 8
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32) >> 8) as u8
}
