use {
    super::types::{Detection, LetterboxInfo},
    crate::InferError,
    base::{Rect, Tensor, Vec2},
    std::cmp::Ordering,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub conf: f32,
    pub iou: f32,
    pub max_detections: usize,
}

/// Decode a YOLOv8-style head output `[1, 4 + nc, N]` into detections.
///
/// Each of the `N` columns holds `cx, cy, w, h` in model input pixels
/// followed by one score per class. A column becomes a candidate when its
/// best class score reaches `conf`; candidates then go through class-aware
/// greedy NMS, are capped at `max_detections` and mapped back to the frame.
pub fn postprocess(
    output: &Tensor<f32>,
    letterbox: &LetterboxInfo,
    frame: Vec2<usize>,
    thresholds: &Thresholds,
) -> Result<Vec<Detection>, InferError> {
    if output.shape.len() != 3 || output.shape[0] != 1 || output.shape[1] <= 4 {
        return Err(InferError::ShapeMismatch {
            expected: "[1, 4 + classes, N]".to_string(),
            got: format!("{:?}", output.shape),
        });
    }

    let rows = output.shape[1];
    let n = output.shape[2];
    let at = |row: usize, col: usize| output.data[row * n + col];

    let mut candidates = Vec::new();
    for i in 0..n {
        let mut class_id = 0;
        let mut confidence = f32::MIN;
        for row in 4..rows {
            let score = at(row, i);
            if score > confidence {
                confidence = score;
                class_id = row - 4;
            }
        }
        if confidence < thresholds.conf {
            continue;
        }

        let bbox = Rect::from_center(
            Vec2::new(at(0, i), at(1, i)),
            Vec2::new(at(2, i), at(3, i)),
        );
        candidates.push(Detection {
            class_id,
            confidence,
            bbox,
        });
    }

    // stable, so equal scores keep column order
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    let mut keep: Vec<Detection> = Vec::new();
    let mut suppressed = vec![false; candidates.len()];
    for i in 0..candidates.len() {
        if keep.len() >= thresholds.max_detections {
            break;
        }
        if suppressed[i] {
            continue;
        }
        keep.push(candidates[i]);
        for j in (i + 1)..candidates.len() {
            if suppressed[j] || candidates[j].class_id != candidates[i].class_id {
                continue;
            }
            if candidates[i].bbox.iou(&candidates[j].bbox) > thresholds.iou {
                suppressed[j] = true;
            }
        }
    }

    let bounds = Rect::new(Vec2::zero(), frame.as_f32());
    for detection in &mut keep {
        let min = letterbox.to_frame(detection.bbox.min());
        let max = letterbox.to_frame(detection.bbox.max());
        detection.bbox = Rect::from_min_max(min, max).clamp_to(bounds);
    }

    Ok(keep)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: LetterboxInfo = LetterboxInfo {
        scale: 1.0,
        pad_x: 0.0,
        pad_y: 0.0,
    };

    const DEFAULTS: Thresholds = Thresholds {
        conf: 0.25,
        iou: 0.45,
        max_detections: 300,
    };

    // columns are (cx, cy, w, h, scores...)
    fn head(columns: &[&[f32]]) -> Tensor<f32> {
        let rows = columns[0].len();
        let n = columns.len();
        let mut data = vec![0.0; rows * n];
        for (i, column) in columns.iter().enumerate() {
            for (row, &value) in column.iter().enumerate() {
                data[row * n + i] = value;
            }
        }
        Tensor::new(vec![1, rows, n], data).unwrap()
    }

    #[test]
    fn test_rejects_wrong_rank() {
        let output = Tensor::new(vec![4, 2], vec![0.0; 8]).unwrap();
        let result = postprocess(&output, &IDENTITY, Vec2::new(640, 640), &DEFAULTS);
        assert!(matches!(result, Err(InferError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_rejects_missing_class_rows() {
        let output = Tensor::new(vec![1, 4, 1], vec![0.0; 4]).unwrap();
        let result = postprocess(&output, &IDENTITY, Vec2::new(640, 640), &DEFAULTS);
        assert!(matches!(result, Err(InferError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_empty_output() {
        let output = Tensor::new(vec![1, 84, 0], vec![]).unwrap();
        let result = postprocess(&output, &IDENTITY, Vec2::new(640, 640), &DEFAULTS).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_argmax_and_threshold() {
        let output = head(&[
            &[100.0, 100.0, 20.0, 20.0, 0.1, 0.7],
            &[300.0, 300.0, 20.0, 20.0, 0.2, 0.1],
        ]);
        let result = postprocess(&output, &IDENTITY, Vec2::new(640, 640), &DEFAULTS).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].class_id, 1);
        assert_eq!(result[0].confidence, 0.7);
        assert_eq!(result[0].bbox, Rect::new(Vec2::new(90.0, 90.0), Vec2::new(20.0, 20.0)));
    }

    #[test]
    fn test_nms_is_class_aware() {
        let output = head(&[
            &[100.0, 100.0, 40.0, 40.0, 0.9, 0.0],
            &[102.0, 100.0, 40.0, 40.0, 0.8, 0.0],
            &[101.0, 100.0, 40.0, 40.0, 0.0, 0.6],
        ]);
        let result = postprocess(&output, &IDENTITY, Vec2::new(640, 640), &DEFAULTS).unwrap();
        let summary: Vec<(usize, f32)> = result.iter().map(|d| (d.class_id, d.confidence)).collect();
        assert_eq!(summary, vec![(0, 0.9), (1, 0.6)]);
    }

    #[test]
    fn test_max_detections() {
        let output = head(&[
            &[50.0, 50.0, 10.0, 10.0, 0.5],
            &[150.0, 50.0, 10.0, 10.0, 0.9],
            &[250.0, 50.0, 10.0, 10.0, 0.7],
        ]);
        let thresholds = Thresholds {
            max_detections: 2,
            ..DEFAULTS
        };
        let result = postprocess(&output, &IDENTITY, Vec2::new(640, 640), &thresholds).unwrap();
        let confidences: Vec<f32> = result.iter().map(|d| d.confidence).collect();
        assert_eq!(confidences, vec![0.9, 0.7]);
    }

    #[test]
    fn test_rescale_and_clamp() {
        // 100x50 frame letterboxed into 64x64: scale 0.64, pad_y 16
        let letterbox = LetterboxInfo {
            scale: 0.64,
            pad_x: 0.0,
            pad_y: 16.0,
        };
        let output = head(&[&[32.0, 32.0, 32.0, 16.0, 0.9], &[60.0, 20.0, 16.0, 16.0, 0.8]]);
        let result = postprocess(&output, &letterbox, Vec2::new(100, 50), &DEFAULTS).unwrap();

        let centred = result[0].bbox;
        assert!((centred.origin.x - 25.0).abs() < 1e-3);
        assert!((centred.origin.y - 12.5).abs() < 1e-3);
        assert!((centred.size.x - 50.0).abs() < 1e-3);
        assert!((centred.size.y - 25.0).abs() < 1e-3);

        // right edge of the second box lies past the frame
        let clipped = result[1].bbox;
        assert!((clipped.max().x - 100.0).abs() < 1e-3);
        assert!((clipped.origin.y - 0.0).abs() < 1e-3);
    }
}
