//! Overlay drawing for annotated frames.
//!
//! Drawing happens on a [`Canvas`], which borrows the pixel buffer of a
//! 3-channel image for the duration of the annotation pass. Colours are
//! always given in RGB and swizzled for BGR frames.

use {
    crate::{
        Image, ImageError, PixelFormat,
        font::{GLYPH_HEIGHT, GLYPH_WIDTH, glyph, is_set},
    },
    base::{Rect, Vec2},
    crates_image::{Rgb, RgbImage},
    imageproc::{
        drawing::{draw_filled_rect_mut, draw_hollow_rect_mut},
        rect::Rect as PixelRect,
    },
};

// label text is drawn with each glyph pixel scaled up to a square block
const TEXT_SCALE: usize = 2;
const LABEL_PADDING: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_hex(0xFFFFFF);
    pub const BLACK: Color = Color::from_hex(0x000000);

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }

    /// Stable colour for a class id.
    pub fn for_class(class_id: usize) -> Self {
        PALETTE[class_id % PALETTE.len()]
    }

    /// Black on light backgrounds, white on dark ones.
    pub fn contrasting(&self) -> Self {
        let luminance = 0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32;
        if luminance > 150.0 { Color::BLACK } else { Color::WHITE }
    }
}

/// Class colours, in the order the YOLO tooling uses them.
pub const PALETTE: [Color; 20] = [
    Color::from_hex(0xFF3838),
    Color::from_hex(0xFF9D97),
    Color::from_hex(0xFF701F),
    Color::from_hex(0xFFB21D),
    Color::from_hex(0xCFD231),
    Color::from_hex(0x48F90A),
    Color::from_hex(0x92CC17),
    Color::from_hex(0x3DDB86),
    Color::from_hex(0x1A9334),
    Color::from_hex(0x00D4BB),
    Color::from_hex(0x2C99A8),
    Color::from_hex(0x00C2FF),
    Color::from_hex(0x344593),
    Color::from_hex(0x6473FF),
    Color::from_hex(0x0018EC),
    Color::from_hex(0x8438FF),
    Color::from_hex(0x520085),
    Color::from_hex(0xCB38FF),
    Color::from_hex(0xFF95C8),
    Color::from_hex(0xFF37C7),
];

/// Box outline width for a frame, `max(round((w + h) / 2 * 0.003), 2)`.
pub fn line_thickness(size: Vec2<usize>) -> u32 {
    (((size.x + size.y) as f32 / 2.0 * 0.003).round() as u32).max(2)
}

pub struct Canvas {
    buffer: RgbImage,
    format: PixelFormat,
}

impl Canvas {
    /// Take over the pixels of `image`. Mono and alpha formats are converted
    /// to RGB first; padded rows are repacked.
    pub fn new(image: Image) -> Result<Self, ImageError> {
        let image = match image.format {
            PixelFormat::Rgb8 | PixelFormat::Bgr8 => image.into_contiguous(),
            _ => image.to_format(PixelFormat::Rgb8),
        };
        let format = image.format;
        let (width, height) = (image.width() as u32, image.height() as u32);
        let buffer = RgbImage::from_raw(width, height, image.data).ok_or_else(|| {
            ImageError::Layout(format!("buffer too small for a {}x{} canvas", width, height))
        })?;
        Ok(Self { buffer, format })
    }

    pub fn size(&self) -> Vec2<usize> {
        Vec2::new(self.buffer.width() as usize, self.buffer.height() as usize)
    }

    fn pixel(&self, color: Color) -> Rgb<u8> {
        match self.format {
            PixelFormat::Bgr8 => Rgb([color.b, color.g, color.r]),
            _ => Rgb([color.r, color.g, color.b]),
        }
    }

    /// Outline `rect` with `thickness` pixels drawn inwards.
    pub fn draw_box(&mut self, rect: Rect<f32>, color: Color, thickness: u32) {
        let x = rect.origin.x.round() as i32;
        let y = rect.origin.y.round() as i32;
        let w = rect.size.x.round().max(0.0) as u32;
        let h = rect.size.y.round().max(0.0) as u32;
        let pixel = self.pixel(color);

        for i in 0..thickness {
            if w <= 2 * i || h <= 2 * i {
                break;
            }
            let inset = PixelRect::at(x + i as i32, y + i as i32).of_size(w - 2 * i, h - 2 * i);
            draw_hollow_rect_mut(&mut self.buffer, inset, pixel);
        }
    }

    /// Size in pixels of the filled tab `draw_label` produces for `text`.
    pub fn label_size(text: &str) -> Vec2<usize> {
        let glyphs = text.chars().count();
        let advance = (GLYPH_WIDTH + 1) * TEXT_SCALE;
        let text_width = (glyphs * advance).saturating_sub(TEXT_SCALE);
        Vec2::new(
            text_width + 2 * LABEL_PADDING,
            GLYPH_HEIGHT * TEXT_SCALE + 2 * LABEL_PADDING,
        )
    }

    /// Draw `text` on a filled tab whose bottom-left corner sits at `anchor`.
    /// When there is no room above the anchor the tab is placed below it.
    /// The tab is shifted left to stay inside the frame.
    pub fn draw_label(&mut self, anchor: Vec2<i32>, text: &str, background: Color) {
        let label = Self::label_size(text);
        let frame = self.size();

        let max_x = frame.x.saturating_sub(label.x) as i32;
        let x = anchor.x.clamp(0, max_x.max(0));
        let y = if anchor.y - label.y as i32 >= 0 {
            anchor.y - label.y as i32
        } else {
            anchor.y.max(0)
        };

        let fill = self.pixel(background);
        draw_filled_rect_mut(
            &mut self.buffer,
            PixelRect::at(x, y).of_size(label.x.max(1) as u32, label.y as u32),
            fill,
        );

        let ink = self.pixel(background.contrasting());
        let mut pen_x = x + LABEL_PADDING as i32;
        let pen_y = y + LABEL_PADDING as i32;
        for c in text.chars() {
            let rows = glyph(c);
            for gy in 0..GLYPH_HEIGHT {
                for gx in 0..GLYPH_WIDTH {
                    if is_set(&rows, gx, gy) {
                        self.fill_block(
                            pen_x + (gx * TEXT_SCALE) as i32,
                            pen_y + (gy * TEXT_SCALE) as i32,
                            ink,
                        );
                    }
                }
            }
            pen_x += ((GLYPH_WIDTH + 1) * TEXT_SCALE) as i32;
        }
    }

    fn fill_block(&mut self, x: i32, y: i32, pixel: Rgb<u8>) {
        let (width, height) = (self.buffer.width() as i32, self.buffer.height() as i32);
        for dy in 0..TEXT_SCALE as i32 {
            for dx in 0..TEXT_SCALE as i32 {
                let (px, py) = (x + dx, y + dy);
                if px >= 0 && py >= 0 && px < width && py < height {
                    self.buffer.put_pixel(px as u32, py as u32, pixel);
                }
            }
        }
    }

    pub fn into_image(self) -> Image {
        let size = self.size();
        Image::new(size, self.buffer.into_raw(), self.format)
    }
}
