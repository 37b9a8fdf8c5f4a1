use crate::classify::face_shape::FaceShape;

/// Shown when classification couldn't settle on a shape.
pub const FALLBACK_RECOMMENDATION: &str = "Unable to determine suitable frames";

/// Eyewear-frame styles suggested for a face shape.
///
/// Pure table lookup; every label yields a non-empty string.
pub fn recommended_frames(shape: FaceShape) -> &'static str {
    match shape {
        FaceShape::Oval => "Rectangle, Cat-eye, Aviator",
        FaceShape::Long => "Round, Oval, Aviator",
        FaceShape::Square => "Circle, Oval, Aviator",
        FaceShape::Diamond => "Oval, Cat-eye",
        FaceShape::Heart => "Circle, Oval",
        FaceShape::Round => "Rectangle, Square",
        FaceShape::Rectangle => "Round, Oval",
        FaceShape::Undefined => FALLBACK_RECOMMENDATION,
    }
}
