use crate::overlay::domain::filter_asset::FilterAsset;
use crate::overlay::domain::placement::Placement;
use crate::shared::frame::Frame;

/// Domain interface for drawing an overlay into a frame.
///
/// `tint_hue` recolors every non-transparent overlay pixel to a
/// fixed-lightness HSL color at that hue before blending; `None` keeps
/// the asset's own colors.
pub trait FrameCompositor: Send {
    fn composite(
        &self,
        frame: &mut Frame,
        asset: &FilterAsset,
        placement: &Placement,
        tint_hue: Option<u16>,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
