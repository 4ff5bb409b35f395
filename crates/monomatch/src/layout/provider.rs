//! Symbol artwork providers.
//!
//! The layout engine asks a [`SymbolAssetProvider`] for each symbol's raster at a
//! requested height:
//! - [`DirectoryAssetProvider`] loads pre-rasterized `<id>.png` files from a directory.
//! - [`ProceduralAssetProvider`] draws a deterministic shape per id, no files needed.
//!
//! Implement the trait to plug in other sources such as a vector rasterizer.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use glam::Vec2;
use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::deck::SymbolId;
use crate::error::{Error, Result};
use crate::layout::raster::{crop_to_opaque, resize_to_height};

/// Source of symbol rasters.
///
/// Implementations must be safe to call from several render threads at once.
pub trait SymbolAssetProvider: Send + Sync {
    /// Returns the symbol's raster at `target_height` pixels, cropped to its opaque
    /// bounding box. Fails with [`Error::AssetUnavailable`].
    fn get_raster(&self, symbol_id: SymbolId, target_height: u32) -> Result<RgbaImage>;
}

impl<P: SymbolAssetProvider + ?Sized> SymbolAssetProvider for Arc<P> {
    fn get_raster(&self, symbol_id: SymbolId, target_height: u32) -> Result<RgbaImage> {
        (**self).get_raster(symbol_id, target_height)
    }
}

impl<P: SymbolAssetProvider + ?Sized> SymbolAssetProvider for &P {
    fn get_raster(&self, symbol_id: SymbolId, target_height: u32) -> Result<RgbaImage> {
        (**self).get_raster(symbol_id, target_height)
    }
}

/// Loads `<dir>/<id>.<extension>` rasters and caches decoded sources.
pub struct DirectoryAssetProvider {
    dir: PathBuf,
    extension: String,
    cache: RwLock<HashMap<SymbolId, Arc<RgbaImage>>>,
}

impl DirectoryAssetProvider {
    /// Creates a provider reading `<dir>/<id>.png`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: "png".to_owned(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Sets the file extension, without the leading dot.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `symbol_id`.
    pub fn path_for(&self, symbol_id: SymbolId) -> PathBuf {
        self.dir.join(format!("{symbol_id}.{}", self.extension))
    }

    /// Number of decoded sources held in the cache.
    pub fn cached_len(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }

    fn load_source(&self, symbol_id: SymbolId) -> Result<Arc<RgbaImage>> {
        if let Some(hit) = self
            .cache
            .read()
            .ok()
            .and_then(|c| c.get(&symbol_id).cloned())
        {
            return Ok(hit);
        }

        let path = self.path_for(symbol_id);
        let decoded = image::open(&path)
            .map_err(|e| Error::asset_unavailable(symbol_id, format!("{}: {e}", path.display())))?
            .into_rgba8();
        let source = Arc::new(crop_to_opaque(&decoded));
        debug!(symbol_id, path = %path.display(), "loaded symbol source");

        match self.cache.write() {
            Ok(mut cache) => {
                cache.insert(symbol_id, source.clone());
            }
            Err(_) => warn!("symbol cache lock poisoned; skipping cache insert"),
        }
        Ok(source)
    }
}

impl SymbolAssetProvider for DirectoryAssetProvider {
    fn get_raster(&self, symbol_id: SymbolId, target_height: u32) -> Result<RgbaImage> {
        if target_height == 0 {
            return Err(Error::asset_unavailable(symbol_id, "target height must be > 0"));
        }
        let source = self.load_source(symbol_id)?;
        if source.width() == 0 || source.height() == 0 {
            return Err(Error::asset_unavailable(symbol_id, "image is empty"));
        }
        Ok(crop_to_opaque(&resize_to_height(&source, target_height)))
    }
}

/// Draws a filled polygon or star per symbol id.
///
/// Shapes vary with the id: corner count, star or plain polygon, and a rotation offset.
#[derive(Debug, Clone, Default)]
pub struct ProceduralAssetProvider {
    missing: Vec<SymbolId>,
}

impl ProceduralAssetProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks ids that fail with [`Error::AssetUnavailable`], for exercising error paths.
    pub fn with_missing(mut self, missing: impl IntoIterator<Item = SymbolId>) -> Self {
        self.missing.extend(missing);
        self
    }

    /// Polygon vertices of `symbol_id` in the unit square.
    pub fn outline(symbol_id: SymbolId) -> Vec<Vec2> {
        let corners = 3 + (symbol_id % 6) as usize;
        let star = (symbol_id / 6) % 2 == 1;
        let offset = (symbol_id / 12) as f32 * 0.37;
        let count = if star { corners * 2 } else { corners };

        (0..count)
            .map(|i| {
                let r = if star && i % 2 == 1 { 0.22 } else { 0.48 };
                let a = offset + i as f32 / count as f32 * std::f32::consts::TAU;
                Vec2::new(0.5 + r * a.cos(), 0.5 + r * a.sin())
            })
            .collect()
    }
}

impl SymbolAssetProvider for ProceduralAssetProvider {
    fn get_raster(&self, symbol_id: SymbolId, target_height: u32) -> Result<RgbaImage> {
        if self.missing.contains(&symbol_id) {
            return Err(Error::asset_unavailable(symbol_id, "marked missing"));
        }
        if target_height == 0 {
            return Err(Error::asset_unavailable(symbol_id, "target height must be > 0"));
        }

        let outline = Self::outline(symbol_id);
        let size = target_height as f32;
        let raster = RgbaImage::from_fn(target_height, target_height, |x, y| {
            let p = Vec2::new((x as f32 + 0.5) / size, (y as f32 + 0.5) / size);
            if point_in_polygon(p, &outline) {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        Ok(crop_to_opaque(&raster))
    }
}

/// Even-odd point-in-polygon test.
fn point_in_polygon(p: Vec2, polygon: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::raster::opaque_bounds;

    #[test]
    fn procedural_raster_fits_requested_height() {
        let provider = ProceduralAssetProvider::new();
        for id in [0, 5, 6, 13, 40] {
            let raster = provider.get_raster(id, 64).unwrap();
            let (w, h) = raster.dimensions();
            assert!((32..=64).contains(&h), "id {id} height {h}");
            assert!(w > 0 && w <= 64);
            assert_eq!(opaque_bounds(&raster), Some((0, 0, w, h)));
        }
    }

    #[test]
    fn procedural_raster_is_deterministic() {
        let provider = ProceduralAssetProvider::new();
        assert_eq!(
            provider.get_raster(17, 48).unwrap(),
            provider.get_raster(17, 48).unwrap()
        );
    }

    #[test]
    fn procedural_shapes_differ_between_ids() {
        assert_ne!(
            ProceduralAssetProvider::outline(0).len(),
            ProceduralAssetProvider::outline(1).len()
        );
        assert_eq!(ProceduralAssetProvider::outline(6).len(), 6);
    }

    #[test]
    fn missing_ids_are_unavailable() {
        let provider = ProceduralAssetProvider::new().with_missing([3]);
        assert!(matches!(
            provider.get_raster(3, 32),
            Err(Error::AssetUnavailable { symbol_id: 3, .. })
        ));
        assert!(provider.get_raster(4, 32).is_ok());
    }

    #[test]
    fn point_in_polygon_square() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        assert!(point_in_polygon(Vec2::new(0.5, 0.5), &square));
        assert!(!point_in_polygon(Vec2::new(1.5, 0.5), &square));
    }

    #[test]
    fn directory_provider_loads_crops_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        let mut img = RgbaImage::new(40, 40);
        for y in 10..30 {
            for x in 5..15 {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        img.save(dir.path().join("7.png")).unwrap();

        let provider = DirectoryAssetProvider::new(dir.path());
        let raster = provider.get_raster(7, 40).unwrap();
        assert_eq!(raster.dimensions(), (20, 40));
        assert_eq!(provider.cached_len(), 1);
        provider.get_raster(7, 10).unwrap();
        assert_eq!(provider.cached_len(), 1);
    }

    #[test]
    fn directory_provider_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let provider = DirectoryAssetProvider::new(dir.path());
        assert!(matches!(
            provider.get_raster(1, 32),
            Err(Error::AssetUnavailable { symbol_id: 1, .. })
        ));
    }

    #[test]
    fn directory_provider_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2.png"), b"not a png").unwrap();
        let provider = DirectoryAssetProvider::new(dir.path());
        assert!(matches!(
            provider.get_raster(2, 32),
            Err(Error::AssetUnavailable { symbol_id: 2, .. })
        ));
    }
}
