use crate::detection::domain::detection_box::DetectionBox;
use crate::detection::domain::landmark_set::LandmarkSet;
use crate::shared::frame::Frame;

/// Appearance attributes some detectors report alongside the geometry.
///
/// Purely informational; nothing downstream branches on them.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceAttributes {
    pub age: f64,
    pub gender: String,
    pub gender_probability: f64,
    pub expression: String,
    pub expression_probability: f64,
}

/// One detected face: bounding box, 68 landmarks, optional attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceDetection {
    pub bounds: DetectionBox,
    pub landmarks: LandmarkSet,
    pub attributes: Option<FaceAttributes>,
}

/// Domain interface for face + landmark detection.
///
/// Implementations may be stateful (warm inference sessions), hence
/// `&mut self`. A failed detect is a transient, per-frame condition; the
/// caller skips the frame and continues.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceDetection>, Box<dyn std::error::Error>>;
}
