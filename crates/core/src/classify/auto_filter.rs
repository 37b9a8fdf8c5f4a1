//! Edge-triggered filter auto-selection.
//!
//! The selection re-applies only when the classified shape differs from
//! the previous frame's shape, never on a repeated label. The very first
//! observation primes the edge detector without firing, so a steady face
//! keeps the initial filter untouched.

use crate::classify::face_shape::FaceShape;
use crate::overlay::domain::filter_kind::FilterKind;

/// Filter used before any shape transition has been observed.
pub const INITIAL_FILTER: FilterKind = FilterKind::Circle;

/// Which overlay a shape transition selects.
pub fn filter_for_shape(shape: FaceShape) -> FilterKind {
    match shape {
        FaceShape::Oval => FilterKind::Aviator,
        FaceShape::Long => FilterKind::Circle,
        _ => FilterKind::Circle,
    }
}

/// Tracks the previous frame's shape and fires on label transitions.
#[derive(Debug, Default)]
pub struct AutoFilterSelector {
    previous: Option<FaceShape>,
}

impl AutoFilterSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's classified shape.
    ///
    /// Returns `Some(filter)` only when the shape changed relative to the
    /// last observation; `None` otherwise (including the priming frame).
    pub fn observe(&mut self, shape: FaceShape) -> Option<FilterKind> {
        let fired = match self.previous {
            Some(prev) if prev != shape => Some(filter_for_shape(shape)),
            Some(_) => None,
            None => None,
        };
        self.previous = Some(shape);
        fired
    }

    /// Forget the observed history, e.g. when detection is interrupted.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_filter_is_circle() {
        assert_eq!(INITIAL_FILTER, FilterKind::Circle);
    }

    #[test]
    fn test_first_observation_primes_without_firing() {
        let mut sel = AutoFilterSelector::new();
        assert_eq!(sel.observe(FaceShape::Oval), None);
    }

    #[test]
    fn test_transition_fires_only_on_edge() {
        // Shape sequence [Oval, Oval, Long]: the selection changes only
        // between the second and third frame.
        let mut sel = AutoFilterSelector::new();
        assert_eq!(sel.observe(FaceShape::Oval), None);
        assert_eq!(sel.observe(FaceShape::Oval), None);
        assert_eq!(sel.observe(FaceShape::Long), Some(FilterKind::Circle));
    }

    #[test]
    fn test_repeated_label_never_fires() {
        let mut sel = AutoFilterSelector::new();
        sel.observe(FaceShape::Long);
        for _ in 0..5 {
            assert_eq!(sel.observe(FaceShape::Long), None);
        }
    }

    #[test]
    fn test_every_transition_fires() {
        let mut sel = AutoFilterSelector::new();
        sel.observe(FaceShape::Long);
        assert_eq!(sel.observe(FaceShape::Oval), Some(FilterKind::Aviator));
        assert_eq!(sel.observe(FaceShape::Square), Some(FilterKind::Circle));
        assert_eq!(sel.observe(FaceShape::Oval), Some(FilterKind::Aviator));
    }

    #[test]
    fn test_unmapped_shapes_select_circle() {
        for shape in [FaceShape::Square, FaceShape::Heart, FaceShape::Undefined] {
            assert_eq!(filter_for_shape(shape), FilterKind::Circle);
        }
    }

    #[test]
    fn test_reset_reprimes() {
        let mut sel = AutoFilterSelector::new();
        sel.observe(FaceShape::Oval);
        sel.reset();
        // After a reset the next observation primes again, no firing.
        assert_eq!(sel.observe(FaceShape::Long), None);
        assert_eq!(sel.observe(FaceShape::Oval), Some(FilterKind::Aviator));
    }
}
