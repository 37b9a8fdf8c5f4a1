/// Face + 68-landmark detector using ONNX Runtime via `ort`.
///
/// Handles letterbox preprocessing, inference, confidence filtering,
/// greedy NMS, and mapping letterbox coordinates back to the frame.
use std::path::Path;

use crate::detection::domain::detection_box::DetectionBox;
use crate::detection::domain::face_detector::{FaceDetection, FaceDetector};
use crate::detection::domain::landmark_set::{LandmarkSet, LANDMARK_COUNT};
use crate::shared::frame::Frame;

/// Fallback model input resolution when the model doesn't specify dimensions.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Default confidence threshold for face detection.
pub const DEFAULT_CONFIDENCE: f64 = 0.25;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.45;

/// Values per detection row beyond the box: 68 landmarks × (x, y, conf).
const NUM_LANDMARK_VALUES: usize = LANDMARK_COUNT * 3;

/// Landmark detector backed by an ONNX Runtime session.
///
/// Expects a YOLO-pose style output: rows of
/// `[cx, cy, w, h, conf, lm0_x, lm0_y, lm0_conf, ...]` with 68 landmarks.
pub struct OnnxLandmarkDetector {
    session: ort::session::Session,
    confidence: f64,
    input_size: u32,
}

impl OnnxLandmarkDetector {
    /// Load the ONNX model and prepare for inference.
    ///
    /// The input resolution is read from the model's input shape
    /// (expecting NCHW); falls back to 640 when the shape is dynamic.
    pub fn new(model_path: &Path, confidence: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;

        let input_size = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    // [N, C, H, W]: use H (square input)
                    if shape.len() >= 4 && shape[2] > 0 {
                        Some(shape[2] as u32)
                    } else {
                        None
                    }
                } else {
                    None
                }
            })
            .unwrap_or(DEFAULT_INPUT_SIZE);

        Ok(Self {
            session,
            confidence,
            input_size,
        })
    }
}

impl FaceDetector for OnnxLandmarkDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceDetection>, Box<dyn std::error::Error>> {
        // 1. Preprocess: letterbox + normalize → NCHW float32
        let (input_tensor, scale, pad_x, pad_y) = letterbox(frame, self.input_size);

        // 2. Inference
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("landmark model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape();

        // Output is [1, features, detections] (transposed) or
        // [1, detections, features]; handle both.
        let (num_dets, num_feats) = if shape.len() == 3 {
            if shape[1] < shape[2] {
                (shape[2], shape[1])
            } else {
                (shape[1], shape[2])
            }
        } else {
            return Err(format!("unexpected model output shape: {shape:?}").into());
        };

        let data = tensor.as_slice().ok_or("cannot get tensor slice")?;
        let transposed = shape.len() == 3 && shape[1] < shape[2];

        // 3. Parse rows above the confidence threshold
        let mut raw = Vec::new();
        for i in 0..num_dets {
            let row = if transposed {
                (0..num_feats)
                    .map(|f| data[f * num_dets + i])
                    .collect::<Vec<f32>>()
            } else {
                data[i * num_feats..(i + 1) * num_feats].to_vec()
            };

            if row.len() < 5 + NUM_LANDMARK_VALUES {
                continue;
            }
            let conf = row[4] as f64;
            if conf < self.confidence {
                continue;
            }

            let cx = row[0] as f64;
            let cy = row[1] as f64;
            let w = row[2] as f64;
            let h = row[3] as f64;

            // Convert from letterbox coords back to frame coords
            let x = ((cx - w / 2.0) - pad_x as f64) / scale;
            let y = ((cy - h / 2.0) - pad_y as f64) / scale;

            let mut points = Vec::with_capacity(LANDMARK_COUNT);
            for k in 0..LANDMARK_COUNT {
                let lx = row[5 + k * 3] as f64;
                let ly = row[5 + k * 3 + 1] as f64;
                points.push(((lx - pad_x as f64) / scale, (ly - pad_y as f64) / scale));
            }

            raw.push(RawDetection {
                bounds: DetectionBox {
                    x,
                    y,
                    width: w / scale,
                    height: h / scale,
                },
                confidence: conf,
                points,
            });
        }

        // 4. NMS, then lift into domain detections
        let kept = nms(&mut raw, NMS_IOU_THRESH);
        let mut detections = Vec::with_capacity(kept.len());
        for d in kept {
            let landmarks = LandmarkSet::new(d.points)?;
            detections.push(FaceDetection {
                bounds: d.bounds,
                landmarks,
                attributes: None,
            });
        }

        Ok(detections)
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Letterbox-resize a frame to `target_size` × `target_size`.
///
/// Returns `(NCHW float32 tensor, scale, pad_x, pad_y)`.
fn letterbox(frame: &Frame, target_size: u32) -> (ndarray::Array4<f32>, f64, u32, u32) {
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;
    let target = target_size as f64;

    let scale = (target / fw).min(target / fh);
    let new_w = (fw * scale).round() as u32;
    let new_h = (fh * scale).round() as u32;
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    // Pad with 114/255 gray, the YOLO convention
    let gray = 114.0f32 / 255.0;
    let mut tensor =
        ndarray::Array4::<f32>::from_elem((1, 3, target_size as usize, target_size as usize), gray);

    let src = frame.as_ndarray(); // [H, W, C] u8
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;

    // Nearest-neighbor resize into the padded region
    for y in 0..new_h as usize {
        let src_y = ((y as f64 / scale) as usize).min(src_h - 1);
        for x in 0..new_w as usize {
            let src_x = ((x as f64 / scale) as usize).min(src_w - 1);
            let ty = pad_y as usize + y;
            let tx = pad_x as usize + x;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    (tensor, scale, pad_x, pad_y)
}

// ---------------------------------------------------------------------------
// NMS
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct RawDetection {
    bounds: DetectionBox,
    confidence: f64,
    points: Vec<(f64, f64)>,
}

/// Greedy NMS: sort by confidence descending, suppress overlapping boxes.
fn nms(dets: &mut [RawDetection], iou_thresh: f64) -> Vec<RawDetection> {
    dets.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep: Vec<RawDetection> = Vec::new();
    for d in dets.iter() {
        if keep.iter().all(|k| k.bounds.iou(&d.bounds) <= iou_thresh) {
            keep.push(d.clone());
        }
    }
    keep
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(x: f64, y: f64, w: f64, h: f64, conf: f64) -> RawDetection {
        RawDetection {
            bounds: DetectionBox {
                x,
                y,
                width: w,
                height: h,
            },
            confidence: conf,
            points: vec![(0.0, 0.0); LANDMARK_COUNT],
        }
    }

    #[test]
    fn test_letterbox_preserves_aspect_ratio() {
        // 200x100 frame → 640x640: scale 3.2, new 640x320, pad_y 160
        let frame = Frame::new(vec![128u8; 200 * 100 * 3], 200, 100, 3, 0);
        let (tensor, scale, pad_x, pad_y) = letterbox(&frame, 640);

        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert!((scale - 3.2).abs() < 0.01);
        assert_eq!(pad_x, 0);
        assert_eq!(pad_y, 160);
    }

    #[test]
    fn test_letterbox_square_frame_has_no_padding() {
        let frame = Frame::new(vec![128u8; 100 * 100 * 3], 100, 100, 3, 0);
        let (_, scale, pad_x, pad_y) = letterbox(&frame, 640);
        assert!((scale - 6.4).abs() < 0.01);
        assert_eq!((pad_x, pad_y), (0, 0));
    }

    #[test]
    fn test_letterbox_values_normalized() {
        let frame = Frame::new(vec![255u8; 100 * 50 * 3], 100, 50, 3, 0);
        let (tensor, _, pad_x, pad_y) = letterbox(&frame, 640);

        // A pixel inside the image region is ~1.0
        let y = pad_y as usize + 1;
        let x = pad_x as usize + 1;
        assert!((tensor[[0, 0, y, x]] - 1.0).abs() < 0.01);

        // A pad pixel keeps the gray fill
        assert!((tensor[[0, 0, 0, 0]] - 114.0 / 255.0).abs() < 0.01);
    }

    #[test]
    fn test_nms_suppresses_overlapping() {
        let mut dets = vec![
            raw(0.0, 0.0, 100.0, 100.0, 0.9),
            raw(5.0, 5.0, 100.0, 100.0, 0.8),
        ];
        let kept = nms(&mut dets, 0.3);
        assert_eq!(kept.len(), 1);
        assert!((kept[0].confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_nms_keeps_non_overlapping() {
        let mut dets = vec![
            raw(0.0, 0.0, 50.0, 50.0, 0.9),
            raw(200.0, 200.0, 50.0, 50.0, 0.8),
        ];
        assert_eq!(nms(&mut dets, 0.3).len(), 2);
    }

    #[test]
    fn test_nms_highest_confidence_wins_regardless_of_order() {
        let mut dets = vec![
            raw(0.0, 0.0, 100.0, 100.0, 0.5),
            raw(2.0, 2.0, 100.0, 100.0, 0.9),
        ];
        let kept = nms(&mut dets, 0.3);
        assert_eq!(kept.len(), 1);
        assert!((kept[0].confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_nms_empty_input() {
        let mut dets: Vec<RawDetection> = Vec::new();
        assert!(nms(&mut dets, 0.3).is_empty());
    }
}
