use serde::{Deserialize, Serialize};

/// Closed set of face-shape labels the classifier can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceShape {
    Oval,
    Long,
    Square,
    Diamond,
    Heart,
    Round,
    Rectangle,
    Undefined,
}

impl FaceShape {
    pub const ALL: &[FaceShape] = &[
        FaceShape::Oval,
        FaceShape::Long,
        FaceShape::Square,
        FaceShape::Diamond,
        FaceShape::Heart,
        FaceShape::Round,
        FaceShape::Rectangle,
        FaceShape::Undefined,
    ];
}

impl std::fmt::Display for FaceShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaceShape::Oval => write!(f, "Oval"),
            FaceShape::Long => write!(f, "Long"),
            FaceShape::Square => write!(f, "Square"),
            FaceShape::Diamond => write!(f, "Diamond"),
            FaceShape::Heart => write!(f, "Heart"),
            FaceShape::Round => write!(f, "Round"),
            FaceShape::Rectangle => write!(f, "Rectangle"),
            FaceShape::Undefined => write!(f, "Undefined"),
        }
    }
}
