//! YOLO object detection on top of a model [`Session`].
//!
//! The detector expects a YOLOv8/YOLO11 detection head exported to ONNX:
//! one `[1, 3, imgsz, imgsz]` input and one `[1, 4 + classes, N]` output.
//! Class names are read from the model's `names` metadata when present.

mod names;
mod postprocess;
mod preprocess;
mod types;

pub use names::parse_names;
pub use postprocess::{Thresholds, postprocess};
pub use preprocess::preprocess;
pub use types::{Detection, Detections, LetterboxInfo};

use {
    crate::{Backend, Device, InferError, ModelSource, OnnxBackend, Session},
    image::Image,
    std::sync::Arc,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Square model input size in pixels.
    pub imgsz: usize,
    pub conf_threshold: f32,
    pub iou_threshold: f32,
    pub max_detections: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            imgsz: 640,
            conf_threshold: 0.25,
            iou_threshold: 0.45,
            max_detections: 300,
        }
    }
}

pub struct ObjectDetector {
    session: Box<dyn Session>,
    input_name: String,
    output_name: String,
    names: Arc<[String]>,
    config: DetectorConfig,
}

impl ObjectDetector {
    /// Load a model on `device` with the default thresholds.
    pub fn new(model: ModelSource, device: Device, imgsz: usize) -> Result<Self, InferError> {
        Self::load(
            model,
            device,
            DetectorConfig {
                imgsz,
                ..DetectorConfig::default()
            },
        )
    }

    pub fn load(
        model: ModelSource,
        device: Device,
        config: DetectorConfig,
    ) -> Result<Self, InferError> {
        let backend = OnnxBackend::new(device);
        let session = backend.load_model(model)?;
        Self::from_session(session, config)
    }

    /// Wrap an already loaded session.
    pub fn from_session(
        session: Box<dyn Session>,
        config: DetectorConfig,
    ) -> Result<Self, InferError> {
        let input_name = session
            .input_names()
            .first()
            .cloned()
            .ok_or_else(|| InferError::ModelLoad("model has no inputs".to_string()))?;
        let output_name = session
            .output_names()
            .first()
            .cloned()
            .ok_or_else(|| InferError::ModelLoad("model has no outputs".to_string()))?;

        let names: Vec<String> = session
            .metadata("names")
            .map(|raw| parse_names(&raw))
            .unwrap_or_default();
        if names.is_empty() {
            log::warn!("model carries no class names, using class ids");
        } else {
            log::debug!("model knows {} classes", names.len());
        }

        Ok(Self {
            session,
            input_name,
            output_name,
            names: names.into(),
            config,
        })
    }

    pub fn with_thresholds(mut self, conf: f32, iou: f32) -> Self {
        self.config.conf_threshold = conf;
        self.config.iou_threshold = iou;
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Run detection on one frame. Accepts contiguous 3-channel (RGB or BGR)
    /// and mono images.
    pub fn detect(&mut self, image: &Image) -> Result<Detections, InferError> {
        let (input, letterbox) = preprocess(image, self.config.imgsz)?;

        let mut outputs = self
            .session
            .run(&[(self.input_name.as_str(), input)])?;
        let output = outputs.remove(&self.output_name).ok_or_else(|| {
            InferError::Runtime(format!("session returned no '{}' output", self.output_name))
        })?;

        let thresholds = Thresholds {
            conf: self.config.conf_threshold,
            iou: self.config.iou_threshold,
            max_detections: self.config.max_detections,
        };
        let detections = postprocess(&output, &letterbox, image.size, &thresholds)?;
        Ok(Detections::new(detections, Arc::clone(&self.names)))
    }
}
