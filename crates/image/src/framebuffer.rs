use crate::Image;

fn pack_u32(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

impl Image {
    /// Pack every pixel as `0xFFRRGGBB`, the framebuffer layout window
    /// backends expect. Padding is skipped.
    pub fn to_u32(&self) -> Vec<u32> {
        let [r, g, b] = self.format.rgb_offsets();
        let channels = self.channels();
        let mut buf = Vec::with_capacity(self.size.area());
        for row in self.rows() {
            for pixel in row.chunks_exact(channels) {
                buf.push(pack_u32(pixel[r], pixel[g], pixel[b]));
            }
        }
        buf
    }
}
