//! Diagnostic graphics drawn into the output frame: detection-box
//! outline and landmark dots. Textual labels go through the pipeline
//! logger instead of being rasterized.

use crate::detection::domain::detection_box::DetectionBox;
use crate::detection::domain::landmark_set::LandmarkSet;
use crate::shared::frame::Frame;

/// Box outline color (deep sky blue).
const BOX_COLOR: [u8; 3] = [0, 191, 255];
/// Landmark dot color (light blue).
const DOT_COLOR: [u8; 3] = [173, 216, 230];

const BOX_THICKNESS: i64 = 3;
const DOT_RADIUS: i64 = 2;

/// Draw the bounding-box outline for one face.
pub fn draw_box(frame: &mut Frame, bounds: &DetectionBox) {
    let x0 = bounds.x.round() as i64;
    let y0 = bounds.y.round() as i64;
    let x1 = (bounds.x + bounds.width).round() as i64;
    let y1 = (bounds.y + bounds.height).round() as i64;

    for t in 0..BOX_THICKNESS {
        for x in x0..=x1 {
            put_pixel(frame, x, y0 + t, BOX_COLOR);
            put_pixel(frame, x, y1 - t, BOX_COLOR);
        }
        for y in y0..=y1 {
            put_pixel(frame, x0 + t, y, BOX_COLOR);
            put_pixel(frame, x1 - t, y, BOX_COLOR);
        }
    }
}

/// Draw a dot at every landmark point.
pub fn draw_landmarks(frame: &mut Frame, landmarks: &LandmarkSet) {
    for &(px, py) in landmarks.points() {
        let cx = px.round() as i64;
        let cy = py.round() as i64;
        for dy in -DOT_RADIUS..=DOT_RADIUS {
            for dx in -DOT_RADIUS..=DOT_RADIUS {
                if dx * dx + dy * dy <= DOT_RADIUS * DOT_RADIUS {
                    put_pixel(frame, cx + dx, cy + dy, DOT_COLOR);
                }
            }
        }
    }
}

fn put_pixel(frame: &mut Frame, x: i64, y: i64, color: [u8; 3]) {
    if x < 0 || y < 0 || x >= frame.width() as i64 || y >= frame.height() as i64 {
        return;
    }
    let channels = frame.channels() as usize;
    let offset = (y as usize * frame.width() as usize + x as usize) * channels;
    let data = frame.data_mut();
    data[offset..offset + 3].copy_from_slice(&color);
}
