use std::fmt;

pub const DEFAULT_IOU_THRESHOLD: f64 = 0.45;

/// Rough subject-to-camera distance, judged from bounding-box area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceCategory {
    VeryClose,
    Close,
    Moderate,
    Far,
}

impl fmt::Display for DistanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceCategory::VeryClose => write!(f, "Very Close"),
            DistanceCategory::Close => write!(f, "Close"),
            DistanceCategory::Moderate => write!(f, "Moderate"),
            DistanceCategory::Far => write!(f, "Far"),
        }
    }
}

/// Axis-aligned bounding box around one detected face.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DetectionBox {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Estimate how far the face is from the camera.
    ///
    /// Area thresholds assume a roughly webcam-scale frame.
    pub fn distance_category(&self) -> DistanceCategory {
        let area = self.area();
        if area > 200_000.0 {
            DistanceCategory::VeryClose
        } else if area > 115_000.0 {
            DistanceCategory::Close
        } else if area > 65_000.0 {
            DistanceCategory::Moderate
        } else {
            DistanceCategory::Far
        }
    }

    pub fn iou(&self, other: &DetectionBox) -> f64 {
        let ix1 = self.x.max(other.x);
        let iy1 = self.y.max(other.y);
        let ix2 = (self.x + self.width).min(other.x + other.width);
        let iy2 = (self.y + self.height).min(other.y + other.height);

        let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
        if inter == 0.0 {
            return 0.0;
        }
        inter / (self.area() + other.area() - inter)
    }
}
