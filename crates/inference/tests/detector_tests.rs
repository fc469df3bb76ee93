use base::{Tensor, Vec2};
use image::{Image, PixelFormat};
use inference::{Device, DetectorConfig, InferError, ModelSource, ObjectDetector, Session};
use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
};

/// Session returning a fixed head output and recording the input shapes it saw.
struct MockSession {
    output: Tensor<f32>,
    names: Option<String>,
    seen: Rc<RefCell<Vec<Vec<usize>>>>,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl MockSession {
    fn new(output: Tensor<f32>, names: Option<&str>) -> (Self, Rc<RefCell<Vec<Vec<usize>>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let session = Self {
            output,
            names: names.map(str::to_string),
            seen: Rc::clone(&seen),
            input_names: vec!["images".to_string()],
            output_names: vec!["output0".to_string()],
        };
        (session, seen)
    }
}

impl Session for MockSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        for (name, tensor) in inputs {
            assert_eq!(*name, "images");
            self.seen.borrow_mut().push(tensor.shape.clone());
        }
        Ok(HashMap::from([("output0".to_string(), self.output.clone())]))
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }

    fn metadata(&self, key: &str) -> Option<String> {
        (key == "names").then(|| self.names.clone()).flatten()
    }
}

// one box centred in a 64x64 input, class 1 at 0.9
fn single_box_output() -> Tensor<f32> {
    Tensor::new(vec![1, 6, 1], vec![32.0, 32.0, 16.0, 16.0, 0.05, 0.9]).unwrap()
}

fn config(imgsz: usize) -> DetectorConfig {
    DetectorConfig {
        imgsz,
        ..DetectorConfig::default()
    }
}

#[test]
fn test_default_config() {
    let config = DetectorConfig::default();
    assert_eq!(config.imgsz, 640);
    assert_eq!(config.conf_threshold, 0.25);
    assert_eq!(config.iou_threshold, 0.45);
    assert_eq!(config.max_detections, 300);
}

#[test]
fn test_detect_maps_to_frame() {
    let (session, seen) = MockSession::new(single_box_output(), Some("{0: 'person', 1: 'car'}"));
    let mut detector = ObjectDetector::from_session(Box::new(session), config(64)).unwrap();
    let frame = Image::filled(Vec2::new(128, 128), PixelFormat::Bgr8, &[0, 0, 0]);

    let detections = detector.detect(&frame).unwrap();

    assert_eq!(seen.borrow().as_slice(), &[vec![1, 3, 64, 64]]);
    assert_eq!(detections.len(), 1);
    let detection = detections.iter().next().unwrap();
    assert_eq!(detection.class_id, 1);
    // 128 -> 64 halves coordinates, so they double on the way back
    assert!((detection.bbox.origin.x - 48.0).abs() < 1e-3);
    assert!((detection.bbox.size.x - 32.0).abs() < 1e-3);
    assert_eq!(detections.label(detection), "car 0.90");
}

#[test]
fn test_names_fall_back_to_ids() {
    let (session, _) = MockSession::new(single_box_output(), None);
    let mut detector = ObjectDetector::from_session(Box::new(session), config(64)).unwrap();
    assert!(detector.names().is_empty());

    let frame = Image::filled(Vec2::new(64, 64), PixelFormat::Rgb8, &[0, 0, 0]);
    let detections = detector.detect(&frame).unwrap();
    let detection = detections.iter().next().unwrap();
    assert_eq!(detections.label(detection), "class1 0.90");
}

#[test]
fn test_with_thresholds() {
    let (session, _) = MockSession::new(single_box_output(), None);
    let mut detector = ObjectDetector::from_session(Box::new(session), config(64))
        .unwrap()
        .with_thresholds(0.95, 0.5);
    assert_eq!(detector.config().conf_threshold, 0.95);

    let frame = Image::filled(Vec2::new(64, 64), PixelFormat::Rgb8, &[0, 0, 0]);
    assert!(detector.detect(&frame).unwrap().is_empty());
}

#[test]
fn test_rejects_four_channels() {
    let (session, seen) = MockSession::new(single_box_output(), None);
    let mut detector = ObjectDetector::from_session(Box::new(session), config(64)).unwrap();
    let frame = Image::filled(Vec2::new(8, 8), PixelFormat::Bgra8, &[0, 0, 0, 255]);

    assert!(matches!(
        detector.detect(&frame),
        Err(InferError::ShapeMismatch { .. })
    ));
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_rejects_padded_rows() {
    let (session, _) = MockSession::new(single_box_output(), None);
    let mut detector = ObjectDetector::from_session(Box::new(session), config(64)).unwrap();
    let frame = Image::with_stride(Vec2::new(2, 2), 8, vec![0; 16], PixelFormat::Rgb8).unwrap();

    assert!(detector.detect(&frame).is_err());
}

#[test]
fn test_session_without_inputs() {
    let (mut session, _) = MockSession::new(single_box_output(), None);
    session.input_names.clear();
    let result = ObjectDetector::from_session(Box::new(session), config(64));
    assert!(matches!(result, Err(InferError::ModelLoad(_))));
}

#[test]
fn test_model_load_failure_is_reported() {
    let result = ObjectDetector::new(
        ModelSource::File("missing/yolov8n.onnx".into()),
        Device::Cpu,
        640,
    );
    assert!(matches!(result, Err(InferError::ModelLoad(_))));
}
