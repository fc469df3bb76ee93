use base::Vec2;
use image::{Image, PixelFormat};
use inference::detector::preprocess;

const PAD: f32 = 114.0 / 255.0;

fn at(data: &[f32], imgsz: usize, ch: usize, x: usize, y: usize) -> f32 {
    data[ch * imgsz * imgsz + y * imgsz + x]
}

#[test]
fn test_output_shape() {
    let frame = Image::filled(Vec2::new(100, 100), PixelFormat::Rgb8, &[0, 0, 0]);
    let (tensor, letterbox) = preprocess(&frame, 64).unwrap();
    assert_eq!(tensor.shape, vec![1, 3, 64, 64]);
    assert!((letterbox.scale - 0.64).abs() < 1e-6);
    assert_eq!((letterbox.pad_x, letterbox.pad_y), (0.0, 0.0));
}

#[test]
fn test_wide_frame_is_padded_vertically() {
    let frame = Image::filled(Vec2::new(128, 64), PixelFormat::Rgb8, &[255, 255, 255]);
    let (tensor, letterbox) = preprocess(&frame, 64).unwrap();

    assert_eq!(letterbox.pad_x, 0.0);
    assert_eq!(letterbox.pad_y, 16.0);
    for ch in 0..3 {
        assert_eq!(at(&tensor.data, 64, ch, 10, 0), PAD);
        assert_eq!(at(&tensor.data, 64, ch, 10, 15), PAD);
        assert_eq!(at(&tensor.data, 64, ch, 10, 16), 1.0);
        assert_eq!(at(&tensor.data, 64, ch, 10, 47), 1.0);
        assert_eq!(at(&tensor.data, 64, ch, 10, 48), PAD);
    }
}

#[test]
fn test_bgr_is_fed_as_rgb() {
    let bgr = Image::filled(Vec2::new(4, 4), PixelFormat::Bgr8, &[0, 0, 255]);
    let rgb = Image::filled(Vec2::new(4, 4), PixelFormat::Rgb8, &[255, 0, 0]);

    let (from_bgr, _) = preprocess(&bgr, 32).unwrap();
    let (from_rgb, _) = preprocess(&rgb, 32).unwrap();

    assert_eq!(from_bgr, from_rgb);
    assert_eq!(at(&from_bgr.data, 32, 0, 5, 5), 1.0);
    assert_eq!(at(&from_bgr.data, 32, 2, 5, 5), 0.0);
}

#[test]
fn test_mono_fills_all_planes() {
    let mono = Image::filled(Vec2::new(8, 8), PixelFormat::Mono8, &[51]);
    let (tensor, _) = preprocess(&mono, 32).unwrap();
    for ch in 0..3 {
        assert!((at(&tensor.data, 32, ch, 3, 3) - 0.2).abs() < 1e-6);
    }
}

#[test]
fn test_rejects_empty() {
    let frame = Image::new(Vec2::new(0, 0), vec![], PixelFormat::Rgb8);
    assert!(preprocess(&frame, 640).is_err());
}
