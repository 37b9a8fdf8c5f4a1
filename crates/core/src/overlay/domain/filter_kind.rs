use serde::{Deserialize, Serialize};

/// Sizing multipliers applied to the inter-eye distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterScale {
    pub width: f64,
    pub height: f64,
}

/// Width multiplier used when a filter has no entry in the scale table
/// (the custom overlay keeps its natural aspect ratio).
pub const DEFAULT_WIDTH_MULTIPLIER: f64 = 2.0;

/// The eyewear overlays the demo ships, plus the user-supplied custom one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Aviator,
    CatEye,
    Circle,
    Oval,
    Rectangle,
    Custom,
}

impl FilterKind {
    /// The static overlays preloaded at startup. `Custom` is excluded:
    /// it only exists once a user supplies an image.
    pub const STATIC: &[FilterKind] = &[
        FilterKind::Aviator,
        FilterKind::CatEye,
        FilterKind::Circle,
        FilterKind::Oval,
        FilterKind::Rectangle,
    ];

    /// Cache key and asset file stem.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Aviator => "aviator",
            FilterKind::CatEye => "cat_eye",
            FilterKind::Circle => "circle",
            FilterKind::Oval => "oval",
            FilterKind::Rectangle => "rectangle",
            FilterKind::Custom => "custom",
        }
    }

    /// Width/height multipliers over the inter-eye distance.
    ///
    /// `None` means "use the asset's natural aspect ratio" (custom).
    pub fn scale(&self) -> Option<FilterScale> {
        let (width, height) = match self {
            FilterKind::Rectangle => (2.0, 0.6),
            FilterKind::Aviator => (2.0, 0.5),
            FilterKind::CatEye => (1.5, 0.45),
            FilterKind::Circle => (1.5, 0.65),
            FilterKind::Oval => (1.5, 1.5),
            FilterKind::Custom => return None,
        };
        Some(FilterScale { width, height })
    }
}

impl std::str::FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aviator" => Ok(FilterKind::Aviator),
            "cat_eye" | "cat-eye" => Ok(FilterKind::CatEye),
            "circle" => Ok(FilterKind::Circle),
            "oval" => Ok(FilterKind::Oval),
            "rectangle" => Ok(FilterKind::Rectangle),
            "custom" => Ok(FilterKind::Custom),
            other => Err(format!("unknown filter '{other}'")),
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
