use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("filter asset not found: {name}")]
    NotFound { name: String },
    #[error("no filters directory configured")]
    NoFiltersDir,
    #[error("no custom filter source set")]
    NoCustomSource,
    #[error("failed to decode filter image {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to fetch filter from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to store fetched filter {path}: {source}")]
    Store {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A decoded RGBA overlay image, ready to composite.
#[derive(Clone, Debug)]
pub struct FilterAsset {
    image: image::RgbaImage,
}

impl FilterAsset {
    pub fn new(image: image::RgbaImage) -> Self {
        Self { image }
    }

    /// Decode a PNG (or any format the `image` crate recognizes) from disk.
    pub fn from_path(path: &Path) -> Result<Self, AssetError> {
        let image = image::open(path)
            .map_err(|e| AssetError::Decode {
                path: path.display().to_string(),
                source: e,
            })?
            .to_rgba8();
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// RGBA at (x, y). Caller must stay in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }
}
