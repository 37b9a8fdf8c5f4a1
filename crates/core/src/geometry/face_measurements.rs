//! Named face measurements derived from the 68-point landmark set.
//!
//! Index convention (fixed; the classifier depends on it):
//! forehead width 0↔16, cheekbone width 4↔12, jaw width 2×(4↔8),
//! face length 27↔8, chin length 8↔57.

use crate::detection::domain::landmark_set::{
    LandmarkSet, CHEEK_LEFT, CHEEK_RIGHT, CHIN, JAW_LEFT, JAW_RIGHT, LOWER_LIP, NOSE_BRIDGE_TOP,
};

/// Euclidean distances between fixed landmark pairs, in frame pixels.
///
/// Recomputed per frame; never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceMeasurements {
    pub forehead_width: f64,
    pub cheekbone_width: f64,
    pub jaw_width: f64,
    pub face_length: f64,
    pub chin_length: f64,
}

impl FaceMeasurements {
    /// Pure function of the landmark set: same input, same output.
    pub fn measure(landmarks: &LandmarkSet) -> Self {
        Self {
            forehead_width: landmarks.distance(JAW_LEFT, JAW_RIGHT),
            cheekbone_width: landmarks.distance(CHEEK_LEFT, CHEEK_RIGHT),
            jaw_width: 2.0 * landmarks.distance(CHEEK_LEFT, CHIN),
            face_length: landmarks.distance(NOSE_BRIDGE_TOP, CHIN),
            chin_length: landmarks.distance(CHIN, LOWER_LIP),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::landmark_set::LANDMARK_COUNT;
    use approx::assert_relative_eq;

    fn test_landmarks() -> LandmarkSet {
        let mut pts = vec![(0.0, 0.0); LANDMARK_COUNT];
        pts[JAW_LEFT] = (0.0, 100.0);
        pts[JAW_RIGHT] = (160.0, 100.0);
        pts[CHEEK_LEFT] = (10.0, 160.0);
        pts[CHEEK_RIGHT] = (150.0, 160.0);
        pts[CHIN] = (80.0, 260.0);
        pts[NOSE_BRIDGE_TOP] = (80.0, 90.0);
        pts[LOWER_LIP] = (80.0, 230.0);
        LandmarkSet::new(pts).unwrap()
    }

    #[test]
    fn test_forehead_width_spans_jaw_extremes() {
        let m = FaceMeasurements::measure(&test_landmarks());
        assert_relative_eq!(m.forehead_width, 160.0);
    }

    #[test]
    fn test_cheekbone_width() {
        let m = FaceMeasurements::measure(&test_landmarks());
        assert_relative_eq!(m.cheekbone_width, 140.0);
    }

    #[test]
    fn test_jaw_width_is_twice_cheek_to_chin() {
        let m = FaceMeasurements::measure(&test_landmarks());
        // cheek-left (10,160) to chin (80,260): sqrt(70² + 100²)
        let half = (70.0f64.powi(2) + 100.0f64.powi(2)).sqrt();
        assert_relative_eq!(m.jaw_width, 2.0 * half);
    }

    #[test]
    fn test_face_length_bridge_to_chin() {
        let m = FaceMeasurements::measure(&test_landmarks());
        assert_relative_eq!(m.face_length, 170.0);
    }

    #[test]
    fn test_chin_length_chin_to_lower_lip() {
        let m = FaceMeasurements::measure(&test_landmarks());
        assert_relative_eq!(m.chin_length, 30.0);
    }

    #[test]
    fn test_measure_is_idempotent() {
        let lm = test_landmarks();
        let first = FaceMeasurements::measure(&lm);
        for _ in 0..10 {
            assert_eq!(FaceMeasurements::measure(&lm), first);
        }
    }

    #[test]
    fn test_translation_invariant() {
        let lm = test_landmarks();
        let shifted = LandmarkSet::new(
            lm.points()
                .iter()
                .map(|&(x, y)| (x + 500.0, y - 42.0))
                .collect(),
        )
        .unwrap();
        let a = FaceMeasurements::measure(&lm);
        let b = FaceMeasurements::measure(&shifted);
        assert_relative_eq!(a.forehead_width, b.forehead_width);
        assert_relative_eq!(a.face_length, b.face_length);
        assert_relative_eq!(a.jaw_width, b.jaw_width);
    }
}
