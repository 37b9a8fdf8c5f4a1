//! In-memory overlay cache keyed by filter name.
//!
//! Each asset is decoded once and reused across frames. The `custom`
//! entry is bound to a per-session source path (the account service's
//! stored upload) and cached until explicitly cleared.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::overlay::domain::filter_asset::{AssetError, FilterAsset};
use crate::overlay::domain::filter_kind::FilterKind;

pub struct FilterStore {
    filters_dir: Option<PathBuf>,
    remote_base: Option<String>,
    custom_source: Option<PathBuf>,
    cache: HashMap<&'static str, FilterAsset>,
}

impl FilterStore {
    /// A store reading static overlays from `filters_dir` (`<name>.png`).
    pub fn new(filters_dir: Option<PathBuf>) -> Self {
        Self {
            filters_dir,
            remote_base: None,
            custom_source: None,
            cache: HashMap::new(),
        }
    }

    /// Fall back to `<base>/<name>.png` for overlays missing from the
    /// filters directory; fetched files are stored there, so each URL is
    /// hit at most once per asset.
    pub fn with_remote(mut self, base_url: impl Into<String>) -> Self {
        self.remote_base = Some(base_url.into());
        self
    }

    /// Bind the custom overlay to an image on disk. Replacing the source
    /// drops any previously cached custom asset.
    pub fn set_custom_source(&mut self, path: PathBuf) {
        self.cache.remove(FilterKind::Custom.name());
        self.custom_source = Some(path);
    }

    /// Forget the custom overlay entirely.
    pub fn clear_custom(&mut self) {
        self.cache.remove(FilterKind::Custom.name());
        self.custom_source = None;
    }

    /// Decode all static overlays up front, failing on the first miss.
    pub fn preload(&mut self) -> Result<(), AssetError> {
        for kind in FilterKind::STATIC {
            self.ensure_loaded(*kind)?;
        }
        Ok(())
    }

    /// Blocking per-key accessor: loads and caches the asset on first
    /// use, returns the cached copy afterwards. A second call for the
    /// same key never re-reads the file.
    pub fn ensure_loaded(&mut self, kind: FilterKind) -> Result<&FilterAsset, AssetError> {
        let key = kind.name();
        if !self.cache.contains_key(key) {
            let path = self.source_path(kind)?;
            let asset = FilterAsset::from_path(&path)?;
            self.cache.insert(key, asset);
        }
        Ok(&self.cache[key])
    }

    /// Cache-only lookup; `None` means "not loaded yet, skip the draw".
    pub fn get(&self, kind: FilterKind) -> Option<&FilterAsset> {
        self.cache.get(kind.name())
    }

    fn source_path(&self, kind: FilterKind) -> Result<PathBuf, AssetError> {
        match kind {
            FilterKind::Custom => self
                .custom_source
                .clone()
                .ok_or(AssetError::NoCustomSource),
            _ => {
                let dir = self.filters_dir.as_ref().ok_or(AssetError::NoFiltersDir)?;
                let path = dir.join(format!("{}.png", kind.name()));
                if path.exists() {
                    return Ok(path);
                }
                if let Some(base) = &self.remote_base {
                    fetch_asset(&format!("{}/{}.png", base, kind.name()), &path)?;
                    return Ok(path);
                }
                Err(AssetError::NotFound {
                    name: kind.name().to_string(),
                })
            }
        }
    }
}

/// One-shot blocking fetch into the filters directory.
fn fetch_asset(url: &str, dest: &Path) -> Result<(), AssetError> {
    let response = reqwest::blocking::get(url).map_err(|e| AssetError::Fetch {
        url: url.to_string(),
        source: e,
    })?;
    let bytes = response.bytes().map_err(|e| AssetError::Fetch {
        url: url.to_string(),
        source: e,
    })?;
    std::fs::write(dest, &bytes).map_err(|e| AssetError::Store {
        path: dest.display().to_string(),
        source: e,
    })
}
