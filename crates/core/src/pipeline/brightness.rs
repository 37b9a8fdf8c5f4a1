//! Ambient-light check over whole frames.

use crate::shared::constants::LOW_LIGHT_THRESHOLD;
use crate::shared::frame::Frame;

/// Mean brightness of a frame: the average over all pixels of each
/// pixel's channel average, with integer truncation at both steps.
pub fn mean_brightness(frame: &Frame) -> u32 {
    let channels = frame.channels() as usize;
    let pixels = (frame.width() * frame.height()) as u64;
    if pixels == 0 {
        return 0;
    }

    let mut sum: u64 = 0;
    for px in frame.data().chunks_exact(channels) {
        let avg = (px[0] as u64 + px[1] as u64 + px[2] as u64) / 3;
        sum += avg;
    }
    (sum / pixels) as u32
}

/// Latches the low-light warning so it fires once when the scene goes
/// dark and re-arms once it brightens again.
#[derive(Debug, Default)]
pub struct BrightnessMonitor {
    warned: bool,
}

impl BrightnessMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` exactly when the warning should be shown.
    pub fn observe(&mut self, frame: &Frame) -> bool {
        let dim = mean_brightness(frame) < LOW_LIGHT_THRESHOLD;
        let fire = dim && !self.warned;
        self.warned = dim;
        fire
    }
}
