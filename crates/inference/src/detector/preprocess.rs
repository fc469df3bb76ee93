use {
    super::types::LetterboxInfo,
    crate::InferError,
    base::Tensor,
    image::Image,
};

const PAD_COLOR: f32 = 114.0 / 255.0;

/// Letterbox a frame into the `[1, 3, imgsz, imgsz]` model input.
///
/// The frame is resized with nearest-neighbour sampling, keeping its aspect
/// ratio, and centred on gray padding. Channels are written in RGB order
/// whatever the pixel format; mono frames are replicated into all three
/// planes. Values are scaled to [0.0, 1.0].
pub fn preprocess(image: &Image, imgsz: usize) -> Result<(Tensor<f32>, LetterboxInfo), InferError> {
    if imgsz == 0 {
        return Err(InferError::ShapeMismatch {
            expected: "imgsz > 0".to_string(),
            got: "0".to_string(),
        });
    }
    if image.is_empty() {
        return Err(InferError::ShapeMismatch {
            expected: "non-empty image".to_string(),
            got: format!("{} image", image.size),
        });
    }
    if !image.is_contiguous() {
        return Err(InferError::ShapeMismatch {
            expected: format!("contiguous rows of {} bytes", image.row_len()),
            got: format!("stride {}", image.stride),
        });
    }
    let channels = image.channels();
    if channels != 3 && channels != 1 {
        return Err(InferError::ShapeMismatch {
            expected: "1 or 3 channels".to_string(),
            got: format!("{} channels", channels),
        });
    }

    let (w, h) = (image.width(), image.height());
    let scale = (imgsz as f32 / w as f32).min(imgsz as f32 / h as f32);
    let new_w = ((w as f32 * scale).round() as usize).clamp(1, imgsz);
    let new_h = ((h as f32 * scale).round() as usize).clamp(1, imgsz);
    let pad_x = (imgsz - new_w) / 2;
    let pad_y = (imgsz - new_h) / 2;

    let offsets = image.format.rgb_offsets();
    let plane = imgsz * imgsz;
    let mut nchw = vec![PAD_COLOR; 3 * plane];

    for y in 0..new_h {
        let src_y = ((y as f32 / scale).floor() as usize).min(h - 1);
        let row = image.row(src_y);
        for x in 0..new_w {
            let src_x = ((x as f32 / scale).floor() as usize).min(w - 1);
            let pixel = &row[src_x * channels..(src_x + 1) * channels];
            let dst = (y + pad_y) * imgsz + x + pad_x;
            for (ch, &offset) in offsets.iter().enumerate() {
                nchw[ch * plane + dst] = pixel[offset] as f32 / 255.0;
            }
        }
    }

    let tensor = Tensor::new(vec![1, 3, imgsz, imgsz], nchw)?;
    let letterbox = LetterboxInfo {
        scale,
        pad_x: pad_x as f32,
        pad_y: pad_y as f32,
    };

    Ok((tensor, letterbox))
}
