//! 68-point facial landmarks in the standard iBUG/Multi-PIE ordering.
//!
//! Index meaning is positional: 0-16 jaw outline (0 and 16 are the
//! temple extremes), 17-26 eyebrows, 27-30 nose bridge (27 at the top),
//! 31-35 nose base, 36-41 left eye (36 outer corner, 39 inner), 42-47
//! right eye (42 inner corner, 45 outer), 48-67 mouth (57 lower lip,
//! 8 is the chin tip on the jaw line). The geometry and placement code
//! depends on exactly this mapping.

use thiserror::Error;

/// Number of points every landmark set must carry.
pub const LANDMARK_COUNT: usize = 68;

// Semantic indices used by measurement and placement code.
pub const JAW_LEFT: usize = 0;
pub const JAW_RIGHT: usize = 16;
pub const CHEEK_LEFT: usize = 4;
pub const CHEEK_RIGHT: usize = 12;
pub const CHIN: usize = 8;
pub const NOSE_BRIDGE_TOP: usize = 27;
pub const LOWER_LIP: usize = 57;
pub const LEFT_EYE_OUTER: usize = 36;
pub const LEFT_EYE_INNER: usize = 39;
pub const RIGHT_EYE_INNER: usize = 42;
pub const RIGHT_EYE_OUTER: usize = 45;

#[derive(Error, Debug)]
pub enum LandmarkError {
    #[error("invalid landmark set: expected {LANDMARK_COUNT} points, got {count}")]
    InvalidLandmarkSet { count: usize },
}

/// An ordered, validated set of 68 facial landmark points.
///
/// Construction checks the count once; every accessor after that can
/// index without bounds surprises.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSet {
    points: Vec<(f64, f64)>,
}

impl LandmarkSet {
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self, LandmarkError> {
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::InvalidLandmarkSet {
                count: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn point(&self, index: usize) -> (f64, f64) {
        self.points[index]
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Euclidean distance between two landmark points.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        let (ax, ay) = self.points[a];
        let (bx, by) = self.points[b];
        ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
    }

    /// Midpoint between two landmark points.
    pub fn midpoint(&self, a: usize, b: usize) -> (f64, f64) {
        let (ax, ay) = self.points[a];
        let (bx, by) = self.points[b];
        ((ax + bx) / 2.0, (ay + by) / 2.0)
    }

    /// Center of the left eye: midpoint of its outer and inner corners.
    pub fn left_eye_center(&self) -> (f64, f64) {
        self.midpoint(LEFT_EYE_OUTER, LEFT_EYE_INNER)
    }

    /// Center of the right eye: midpoint of its inner and outer corners.
    pub fn right_eye_center(&self) -> (f64, f64) {
        self.midpoint(RIGHT_EYE_INNER, RIGHT_EYE_OUTER)
    }

    /// Distance between the two eye centers.
    pub fn eye_distance(&self) -> f64 {
        let (lx, ly) = self.left_eye_center();
        let (rx, ry) = self.right_eye_center();
        ((rx - lx).powi(2) + (ry - ly).powi(2)).sqrt()
    }
}
