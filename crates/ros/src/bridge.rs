use {
    crate::{BridgeError, Header, ImageMsg},
    base::Vec2,
    image::{Image, PixelFormat},
};

/// Requested pixel layout of a converted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Keep whatever the message carries, padding included.
    Passthrough,
    /// Convert into this format.
    Target(PixelFormat),
}

/// Map a `sensor_msgs/Image` encoding string onto a pixel format.
pub fn pixel_format(encoding: &str) -> Result<PixelFormat, BridgeError> {
    match encoding {
        "rgb8" => Ok(PixelFormat::Rgb8),
        "bgr8" | "8UC3" => Ok(PixelFormat::Bgr8),
        "rgba8" => Ok(PixelFormat::Rgba8),
        "bgra8" | "8UC4" => Ok(PixelFormat::Bgra8),
        "mono8" | "8UC1" => Ok(PixelFormat::Mono8),
        other => Err(BridgeError::UnsupportedEncoding(other.to_string())),
    }
}

pub fn encoding_name(format: PixelFormat) -> &'static str {
    match format {
        PixelFormat::Rgb8 => "rgb8",
        PixelFormat::Bgr8 => "bgr8",
        PixelFormat::Rgba8 => "rgba8",
        PixelFormat::Bgra8 => "bgra8",
        PixelFormat::Mono8 => "mono8",
    }
}

/// Convert a frame message into an [`Image`].
///
/// With [`Encoding::Passthrough`] the row padding of the message is kept
/// (`stride == step`); target conversions always produce contiguous images.
pub fn imgmsg_to_image(msg: &ImageMsg, encoding: Encoding) -> Result<Image, BridgeError> {
    let format = pixel_format(&msg.encoding)?;
    let size = Vec2::new(msg.width as usize, msg.height as usize);
    let step = msg.step as usize;

    let row_len = size.x * format.channels();
    if step < row_len {
        return Err(BridgeError::Stride { step, row_len });
    }
    let needed = step * size.y;
    if msg.data.len() < needed {
        return Err(BridgeError::Truncated {
            len: msg.data.len(),
            needed,
        });
    }

    let image = Image::with_stride(size, step, msg.data.clone(), format)?;
    match encoding {
        Encoding::Passthrough => Ok(image),
        Encoding::Target(target) => Ok(image.to_format(target)),
    }
}

/// Build a frame message carrying `image` as-is.
pub fn image_to_imgmsg(image: &Image, header: Header) -> ImageMsg {
    ImageMsg {
        header,
        height: image.height() as u32,
        width: image.width() as u32,
        encoding: encoding_name(image.format).to_string(),
        is_bigendian: 0,
        step: image.stride as u32,
        data: image.data.clone(),
    }
}
