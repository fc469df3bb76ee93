use {
    base::{Rect, Vec2},
    image::{
        Canvas, Color, Image, ImageError,
        draw::line_thickness,
    },
    std::sync::Arc,
};

/// Letterbox parameters for mapping model coordinates back to the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxInfo {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
}

impl LetterboxInfo {
    pub fn to_frame(&self, point: Vec2<f32>) -> Vec2<f32> {
        Vec2::new(
            (point.x - self.pad_x) / self.scale,
            (point.y - self.pad_y) / self.scale,
        )
    }
}

/// One detected object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub class_id: usize,
    /// Class score in [0.0, 1.0].
    pub confidence: f32,
    /// Box in frame pixels, clamped to the frame.
    pub bbox: Rect<f32>,
}

/// The result of one inference call, sorted by confidence descending.
#[derive(Debug, Clone, PartialEq)]
pub struct Detections {
    detections: Vec<Detection>,
    names: Arc<[String]>,
}

impl Detections {
    pub fn new(detections: Vec<Detection>, names: Arc<[String]>) -> Self {
        Self { detections, names }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
        self.detections.iter()
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Class name, `class<N>` when the model carries no name for it.
    pub fn name(&self, class_id: usize) -> String {
        self.names
            .get(class_id)
            .cloned()
            .unwrap_or_else(|| fallback_name(class_id))
    }

    /// Overlay label, e.g. `person 0.87`.
    pub fn label(&self, detection: &Detection) -> String {
        format!("{} {:.2}", self.name(detection.class_id), detection.confidence)
    }

    /// Render boxes and labels onto a copy of `image`.
    pub fn plot(&self, image: &Image) -> Result<Image, ImageError> {
        let thickness = line_thickness(image.size);
        let mut canvas = Canvas::new(image.clone())?;
        for detection in &self.detections {
            let color = Color::for_class(detection.class_id);
            canvas.draw_box(detection.bbox, color, thickness);
            let anchor = Vec2::new(
                detection.bbox.origin.x.round() as i32,
                detection.bbox.origin.y.round() as i32,
            );
            canvas.draw_label(anchor, &self.label(detection), color);
        }
        Ok(canvas.into_image())
    }
}

impl<'a> IntoIterator for &'a Detections {
    type Item = &'a Detection;
    type IntoIter = std::slice::Iter<'a, Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.iter()
    }
}

pub(crate) fn fallback_name(class_id: usize) -> String {
    format!("class{class_id}")
}
