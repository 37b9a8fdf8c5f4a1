use crate::overlay::domain::filter_asset::FilterAsset;
use crate::overlay::domain::frame_compositor::FrameCompositor;
use crate::overlay::domain::placement::Placement;
use crate::shared::frame::Frame;

use super::hsl::overlay_tint;

/// CPU compositor: nearest-neighbor scale to the placement rectangle,
/// optional hue tint, source-over alpha blend, clipped at frame edges.
pub struct CpuCompositor;

impl CpuCompositor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CpuCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCompositor for CpuCompositor {
    fn composite(
        &self,
        frame: &mut Frame,
        asset: &FilterAsset,
        placement: &Placement,
        tint_hue: Option<u16>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let fw = frame.width() as i64;
        let fh = frame.height() as i64;
        let channels = frame.channels() as usize;

        let dst_w = placement.width.round() as i64;
        let dst_h = placement.height.round() as i64;
        if dst_w <= 0 || dst_h <= 0 || asset.width() == 0 || asset.height() == 0 {
            return Ok(());
        }

        let dst_x = placement.x.round() as i64;
        let dst_y = placement.y.round() as i64;

        // Clip the destination rectangle to the frame
        let x0 = dst_x.max(0);
        let y0 = dst_y.max(0);
        let x1 = (dst_x + dst_w).min(fw);
        let y1 = (dst_y + dst_h).min(fh);
        if x0 >= x1 || y0 >= y1 {
            return Ok(());
        }

        let tint = tint_hue.map(overlay_tint);
        let frame_w = fw as usize;
        let data = frame.data_mut();

        for y in y0..y1 {
            // Source row via nearest neighbor
            let sy = ((y - dst_y) as u64 * asset.height() as u64 / dst_h as u64) as u32;
            let sy = sy.min(asset.height() - 1);
            for x in x0..x1 {
                let sx = ((x - dst_x) as u64 * asset.width() as u64 / dst_w as u64) as u32;
                let sx = sx.min(asset.width() - 1);

                let [pr, pg, pb, pa] = asset.pixel(sx, sy);
                if pa == 0 {
                    continue;
                }
                let [sr, sg, sb] = match tint {
                    Some(color) => color,
                    None => [pr, pg, pb],
                };

                let offset = (y as usize * frame_w + x as usize) * channels;
                let alpha = pa as u32;
                let inv = 255 - alpha;
                data[offset] = ((sr as u32 * alpha + data[offset] as u32 * inv) / 255) as u8;
                data[offset + 1] =
                    ((sg as u32 * alpha + data[offset + 1] as u32 * inv) / 255) as u8;
                data[offset + 2] =
                    ((sb as u32 * alpha + data[offset + 2] as u32 * inv) / 255) as u8;
            }
        }

        Ok(())
    }
}
