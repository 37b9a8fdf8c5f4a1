//! Overlay placement: where an eyewear frame sits on a face.
//!
//! The overlay is centered on the midpoint between the two eye centers
//! and sized proportionally to the inter-eye distance using the
//! per-filter multiplier table; the custom overlay keeps its natural
//! aspect ratio.

use crate::detection::domain::landmark_set::LandmarkSet;
use crate::overlay::domain::filter_kind::{FilterKind, DEFAULT_WIDTH_MULTIPLIER};

/// Destination rectangle for one overlay draw, in frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Compute the placement rectangle for a filter on a face.
///
/// Returns `None` when the draw should be skipped for this frame:
/// degenerate eye geometry (zero inter-eye distance) or a zero-sized
/// asset. Skipping is the recoverable path, not an error.
pub fn placement(
    landmarks: &LandmarkSet,
    kind: FilterKind,
    asset_size: (u32, u32),
) -> Option<Placement> {
    let eye_distance = landmarks.eye_distance();
    if eye_distance <= 0.0 {
        return None;
    }

    let (width, height) = match kind.scale() {
        Some(scale) => (eye_distance * scale.width, eye_distance * scale.height),
        None => {
            let (aw, ah) = asset_size;
            if aw == 0 || ah == 0 {
                return None;
            }
            let width = eye_distance * DEFAULT_WIDTH_MULTIPLIER;
            (width, width * ah as f64 / aw as f64)
        }
    };

    let (lx, ly) = landmarks.left_eye_center();
    let (rx, ry) = landmarks.right_eye_center();
    let cx = (lx + rx) / 2.0;
    let cy = (ly + ry) / 2.0;

    Some(Placement {
        x: cx - width / 2.0,
        y: cy - height / 2.0,
        width,
        height,
    })
}
