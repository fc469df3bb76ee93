//! Pixel buffers for camera frames.
//!
//! An [`Image`] is an 8-bit interleaved buffer with an explicit row stride,
//! so frames arriving with padded rows can be carried without copying and
//! repacked only when a consumer needs a contiguous layout.

mod convert;
pub mod draw;
mod error;
mod font;
mod framebuffer;
mod image;
mod pixelformat;

pub use draw::{Canvas, Color, PALETTE};
pub use error::ImageError;
pub use image::Image;
pub use pixelformat::PixelFormat;
