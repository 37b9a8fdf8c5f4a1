use crate::geometry::face_measurements::FaceMeasurements;

/// Dimensionless ratios the shape classifier runs on.
///
/// Degenerate measurements (zero widths) produce non-finite ratios; the
/// classifier's predicates all fail on those and fall through to
/// `Undefined` rather than inventing a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeRatios {
    /// face_length / cheekbone_width
    pub length: f64,
    /// jaw_width / cheekbone_width
    pub jaw: f64,
    /// forehead_width / cheekbone_width
    pub forehead: f64,
    /// chin_length / jaw_width
    pub chin: f64,
}

impl From<&FaceMeasurements> for ShapeRatios {
    fn from(m: &FaceMeasurements) -> Self {
        Self {
            length: m.face_length / m.cheekbone_width,
            jaw: m.jaw_width / m.cheekbone_width,
            forehead: m.forehead_width / m.cheekbone_width,
            chin: m.chin_length / m.jaw_width,
        }
    }
}
