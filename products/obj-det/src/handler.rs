//! Per-frame processing: message → image → detections → window.
//!
//! Nothing a single frame does can stop the node. Every failure is logged
//! and reported as [`FrameOutcome::Dropped`].

use {
    crate::ViewerError,
    image::{Image, ImageError},
    inference::{Detections, InferError, ObjectDetector},
    ros::{BridgeError, Encoding, ImageMsg, imgmsg_to_image},
};

/// Something that turns a frame into detections.
pub trait Detect {
    fn detect(&mut self, image: &Image) -> Result<Detections, InferError>;
}

impl Detect for ObjectDetector {
    fn detect(&mut self, image: &Image) -> Result<Detections, InferError> {
        ObjectDetector::detect(self, image)
    }
}

/// Something that shows annotated frames.
pub trait FrameSink {
    fn show(&mut self, image: &Image) -> Result<(), ViewerError>;

    /// False once the user asked to close the display.
    fn is_open(&self) -> bool {
        true
    }

    /// Service input events between frames.
    fn poll(&mut self) {}
}

impl<T: FrameSink + ?Sized> FrameSink for Box<T> {
    fn show(&mut self, image: &Image) -> Result<(), ViewerError> {
        (**self).show(image)
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn poll(&mut self) {
        (**self).poll()
    }
}

#[derive(Debug)]
pub enum DropReason {
    Conversion(BridgeError),
    Empty,
    Inference(InferError),
    Render(ImageError),
    Show(ViewerError),
}

#[derive(Debug)]
pub enum FrameOutcome {
    Displayed { detections: Detections },
    Dropped(DropReason),
}

impl FrameOutcome {
    pub fn is_displayed(&self) -> bool {
        matches!(self, FrameOutcome::Displayed { .. })
    }
}

pub struct FrameHandler<D, S> {
    detector: D,
    display: S,
    frames: u64,
}

impl<D: Detect, S: FrameSink> FrameHandler<D, S> {
    pub fn new(detector: D, display: S) -> Self {
        Self {
            detector,
            display,
            frames: 0,
        }
    }

    /// Number of frames shown so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn display(&self) -> &S {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut S {
        &mut self.display
    }

    pub fn into_parts(self) -> (D, S) {
        (self.detector, self.display)
    }

    pub fn handle(&mut self, msg: &ImageMsg) -> FrameOutcome {
        let image = match imgmsg_to_image(msg, Encoding::Passthrough) {
            Ok(image) => image,
            Err(err) => {
                log::error!("Failed to convert image: {}", err);
                return FrameOutcome::Dropped(DropReason::Conversion(err));
            }
        };
        if image.is_empty() {
            log::error!("Converted image is empty");
            return FrameOutcome::Dropped(DropReason::Empty);
        }

        let image = image.strip_alpha().into_contiguous();

        let detections = match self.detector.detect(&image) {
            Ok(detections) => detections,
            Err(err) => {
                log::error!("Inference failed: {}", err);
                return FrameOutcome::Dropped(DropReason::Inference(err));
            }
        };

        let annotated = match detections.plot(&image) {
            Ok(annotated) => annotated,
            Err(err) => {
                log::error!("Failed to render detections: {}", err);
                return FrameOutcome::Dropped(DropReason::Render(err));
            }
        };

        if let Err(err) = self.display.show(&annotated) {
            log::error!("Failed to show frame: {}", err);
            return FrameOutcome::Dropped(DropReason::Show(err));
        }

        self.frames += 1;
        log::debug!(
            "frame {}: {} detections on {}",
            self.frames,
            detections.len(),
            image.size
        );
        FrameOutcome::Displayed { detections }
    }
}
