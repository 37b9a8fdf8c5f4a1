//! Ordered threshold classifier over [`ShapeRatios`].
//!
//! Predicates are evaluated top to bottom; the first match wins and there
//! is no fallthrough once matched. Thresholds are configuration, not
//! literals: tuning happens through a JSON file, never a recompile.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::face_shape::FaceShape;
use crate::geometry::shape_ratios::ShapeRatios;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read classifier config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse classifier config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Threshold table for the ordered predicate chain.
///
/// Field names mirror the predicate each threshold belongs to. Missing
/// fields in a config file fall back to the canonical defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Long: length ratio strictly above this.
    pub long_length: f64,
    /// Rectangle: length ratio strictly above this...
    pub rect_length: f64,
    /// ...with jaw ratio at or above this.
    pub rect_jaw: f64,
    /// Square: jaw ratio at or above this...
    pub square_jaw: f64,
    /// ...with length ratio at or below this.
    pub square_length: f64,
    /// Heart: forehead ratio at or above this...
    pub heart_forehead: f64,
    /// ...with chin ratio strictly below this.
    pub heart_chin: f64,
    /// Diamond: forehead ratio strictly below this...
    pub diamond_forehead: f64,
    /// ...with jaw ratio strictly below this.
    pub diamond_jaw: f64,
    /// Round: length ratio strictly below this.
    pub round_length: f64,
    /// Oval: length ratio at or below this.
    pub oval_length: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            long_length: 1.75,
            rect_length: 1.45,
            rect_jaw: 0.9,
            square_jaw: 0.9,
            square_length: 1.25,
            heart_forehead: 1.05,
            heart_chin: 0.32,
            diamond_forehead: 0.95,
            diamond_jaw: 0.85,
            round_length: 1.15,
            oval_length: 1.75,
        }
    }
}

impl ClassifierConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// Map a ratio vector to a face-shape label.
///
/// Pure and deterministic; any input a predicate cannot claim (including
/// non-finite ratios from degenerate measurements) is `Undefined`.
pub fn classify(ratios: &ShapeRatios, config: &ClassifierConfig) -> FaceShape {
    let r = ratios;
    let c = config;

    if r.length > c.long_length {
        FaceShape::Long
    } else if r.length > c.rect_length && r.jaw >= c.rect_jaw {
        FaceShape::Rectangle
    } else if r.jaw >= c.square_jaw && r.length <= c.square_length {
        FaceShape::Square
    } else if r.forehead >= c.heart_forehead && r.chin < c.heart_chin {
        FaceShape::Heart
    } else if r.forehead < c.diamond_forehead && r.jaw < c.diamond_jaw {
        FaceShape::Diamond
    } else if r.length < c.round_length {
        FaceShape::Round
    } else if r.length <= c.oval_length {
        FaceShape::Oval
    } else {
        FaceShape::Undefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ratios(length: f64, jaw: f64, forehead: f64, chin: f64) -> ShapeRatios {
        ShapeRatios {
            length,
            jaw,
            forehead,
            chin,
        }
    }

    fn classify_default(r: ShapeRatios) -> FaceShape {
        classify(&r, &ClassifierConfig::default())
    }

    #[rstest]
    #[case::long(ratios(1.9, 0.8, 1.0, 0.4), FaceShape::Long)]
    #[case::rectangle(ratios(1.6, 0.95, 1.0, 0.4), FaceShape::Rectangle)]
    #[case::square(ratios(1.1, 0.95, 1.0, 0.4), FaceShape::Square)]
    #[case::heart(ratios(1.3, 0.8, 1.1, 0.2), FaceShape::Heart)]
    #[case::diamond(ratios(1.3, 0.8, 0.9, 0.4), FaceShape::Diamond)]
    #[case::round(ratios(1.05, 0.8, 1.0, 0.4), FaceShape::Round)]
    #[case::oval(ratios(1.5, 0.8, 1.0, 0.4), FaceShape::Oval)]
    fn test_each_label_reachable(#[case] r: ShapeRatios, #[case] expected: FaceShape) {
        assert_eq!(classify_default(r), expected);
    }

    #[test]
    fn test_non_finite_ratios_are_undefined() {
        let nan = 0.0 / 0.0f64;
        assert_eq!(
            classify_default(ratios(nan, nan, nan, nan)),
            FaceShape::Undefined
        );
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let r = ratios(1.3, 0.88, 1.0, 0.4);
        let first = classify_default(r);
        for _ in 0..10 {
            assert_eq!(classify_default(r), first);
        }
    }

    // At a threshold boundary exactly one predicate owns the input.
    #[rstest]
    // length exactly at long_length: Long needs strictly-greater, Oval takes it
    #[case::long_boundary(ratios(1.75, 0.8, 1.0, 0.4), FaceShape::Oval)]
    // jaw exactly at square_jaw with short face: Square's >= claims it
    #[case::square_boundary(ratios(1.25, 0.9, 1.0, 0.4), FaceShape::Square)]
    // length exactly at round_length: Round needs strictly-less, Oval takes it
    #[case::round_boundary(ratios(1.15, 0.8, 1.0, 0.4), FaceShape::Oval)]
    // chin exactly at heart_chin: Heart needs strictly-less, falls past it
    #[case::heart_boundary(ratios(1.3, 0.88, 1.1, 0.32), FaceShape::Oval)]
    fn test_boundary_ownership(#[case] r: ShapeRatios, #[case] expected: FaceShape) {
        assert_eq!(classify_default(r), expected);
    }

    #[test]
    fn test_first_match_wins_over_later_predicates() {
        // Satisfies both Rectangle (length > 1.45, jaw >= 0.9) and Oval
        // (length <= 1.75); order picks Rectangle.
        assert_eq!(
            classify_default(ratios(1.6, 0.95, 1.0, 0.4)),
            FaceShape::Rectangle
        );
    }

    #[test]
    fn test_thresholds_are_configuration() {
        let mut config = ClassifierConfig::default();
        let r = ratios(1.5, 0.8, 1.0, 0.4);
        assert_eq!(classify(&r, &config), FaceShape::Oval);
        config.long_length = 1.4;
        assert_eq!(classify(&r, &config), FaceShape::Long);
    }

    #[test]
    fn test_load_partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");
        fs::write(&path, r#"{ "long_length": 2.0 }"#).unwrap();

        let config = ClassifierConfig::load(&path).unwrap();
        assert_eq!(config.long_length, 2.0);
        assert_eq!(config.round_length, ClassifierConfig::default().round_length);
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(matches!(
            ClassifierConfig::load(Path::new("/nonexistent/classifier.json")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            ClassifierConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
