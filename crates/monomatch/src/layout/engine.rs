//! Card layout engine: turns a card's symbol list into a rendered card face.
//!
//! Pipeline per card:
//! 1. seed from the symbol sequence and sample blue-noise points,
//! 2. calibrate a circle holding one point per symbol,
//! 3. size, rotate and recolor each symbol raster,
//! 4. composite, crop to the symbol cluster and center it on the card,
//! 5. draw the background disk and composite the foreground over it.
use glam::{DVec2, Vec2};
use image::imageops;
use image::{Rgb, RgbaImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace, warn};

use crate::deck::{Card, SymbolId};
use crate::error::{Error, Result};
use crate::layout::calibrate::CircleCalibrator;
use crate::layout::config::RenderConfig;
use crate::layout::enclosing::smallest_enclosing_circle;
use crate::layout::palette::Palette;
use crate::layout::progress::{ProgressSink, ProgressTracker};
use crate::layout::provider::SymbolAssetProvider;
use crate::layout::raster::{
    crop_square_padded, crop_to_opaque, draw_ringed_disk, fit_to_square, recolor, resize_rgba,
    rotate_expand,
};
use crate::sampling::{
    rand01, seed_for_symbol, seed_for_symbols, sort_by_center_distance, PoissonDiskSampling,
    UNIT_CENTER,
};

/// Margin kept between nominal and extreme symbol sizes, in pixels.
pub const SYMBOL_MARGIN_PX: f32 = 32.0;
/// Smallest edge of a placed symbol tile, in pixels.
pub const MIN_SYMBOL_PX: u32 = 64;
/// Symbol rasters are requested at this multiple of the ideal symbol size.
pub const ASSET_OVERSAMPLE: f32 = 4.0;
/// Largest symbol rotation, in whole degrees; angles are drawn from `0..=359`.
pub const MAX_ROTATION_DEGREES: u32 = 359;
/// Extra pixels around the working foreground canvas.
pub const FOREGROUND_MARGIN_PX: u32 = 10;
/// Card face fill.
pub const BACKGROUND_FILL: Rgb<u8> = Rgb([40, 42, 54]);
/// Card face outline ring.
pub const BACKGROUND_OUTLINE: Rgb<u8> = Rgb([30, 32, 44]);

/// Fallback nearest-neighbor distance when a card has fewer than two symbols.
const LONE_SYMBOL_DISTANCE: f32 = 1.0;

// Progress budget per pipeline stage.
const PROGRESS_SETUP: f32 = 0.1;
const PROGRESS_SAMPLING: f32 = 0.2;
const PROGRESS_CALIBRATION: f32 = 0.1;
const PROGRESS_PALETTE: f32 = 0.1;
const PROGRESS_SYMBOLS: f32 = 0.3;
const PROGRESS_CLUSTER: f32 = 0.15;
const PROGRESS_FINISH: f32 = 0.05 / 3.0;

/// A rendered card face and the parameters that produced it.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// Index of the card in its deck.
    pub card_index: usize,
    /// Symbols on the card, in layout order.
    pub symbols: Vec<SymbolId>,
    /// Foreground composited over the background.
    pub full_image: RgbaImage,
    /// Symbols only, on a transparent canvas.
    pub foreground_image: RgbaImage,
    /// Card disk only.
    pub background_image: RgbaImage,
    /// `(width, height)` of every image.
    pub dimensions: (u32, u32),
    pub symbols_per_card: usize,
    pub deck_symbol_count: usize,
    pub spacing_multiplier: u32,
    /// Radius of the calibrated selection circle, in unit-square units.
    pub calibrated_radius: f32,
    /// Nominal symbol size in pixels.
    pub ideal_symbol_size: f32,
    /// Sample points inside the circle beyond those selected.
    pub excess_points: usize,
    /// Sample points outside the circle.
    pub rejected_points: usize,
}

/// Renders cards with a fixed configuration and asset provider.
pub struct CardRenderer<'a> {
    /// Render configuration applied to every card.
    pub config: RenderConfig,
    /// Source of symbol artwork.
    pub provider: &'a dyn SymbolAssetProvider,
}

impl<'a> CardRenderer<'a> {
    pub fn try_new(config: RenderConfig, provider: &'a dyn SymbolAssetProvider) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, provider })
    }

    /// Renders `card`, returning the result.
    pub fn render(&self, card: &Card, deck_symbol_count: usize) -> Result<RenderResult> {
        render(card, deck_symbol_count, &self.config, self.provider, &mut ())
    }

    pub fn render_with_progress(
        &self,
        card: &Card,
        deck_symbol_count: usize,
        progress: &mut dyn ProgressSink,
    ) -> Result<RenderResult> {
        render(card, deck_symbol_count, &self.config, self.provider, progress)
    }
}

/// Renders one card face.
///
/// The output depends only on the card's symbol sequence, `config` and the provider,
/// so rendering the same card twice yields identical images.
pub fn render(
    card: &Card,
    deck_symbol_count: usize,
    config: &RenderConfig,
    provider: &dyn SymbolAssetProvider,
    progress: &mut dyn ProgressSink,
) -> Result<RenderResult> {
    config.validate()?;
    let symbols = card.symbols();
    if let Some(bad) = symbols
        .iter()
        .find(|&&s| deck_symbol_count > 0 && s as usize >= deck_symbol_count)
    {
        return Err(Error::InvalidParameter(format!(
            "card {} uses symbol {bad} outside a deck of {deck_symbol_count} symbols",
            card.index()
        )));
    }
    if symbols.is_empty() {
        warn!(card = card.index(), "card has no symbols; rendering blank face");
    }

    let mut tracker = ProgressTracker::new(progress);
    let dim = config.output_dimension;
    let card_seed = seed_for_symbols(symbols);
    tracker.step(PROGRESS_SETUP);

    let separation = config.min_separation();
    let points = PoissonDiskSampling::new(separation)
        .with_attempts(config.sampler_attempts)
        .sample_seeded(card_seed);
    tracker.step(PROGRESS_SAMPLING);

    let calibration =
        CircleCalibrator::new(separation).calibrate(&points, UNIT_CENTER, symbols.len())?;
    if config.debug_logging {
        debug!(
            card = card.index(),
            sampled = points.len(),
            in_circle = calibration.selected.len() + calibration.excess.len(),
            required = symbols.len(),
            pruned = calibration.excess.len(),
            "calibrated layout"
        );
    } else {
        trace!(card = card.index(), sampled = points.len(), "calibrated layout");
    }
    tracker.step(PROGRESS_CALIBRATION);

    let anchors = normalize_points(&calibration.selected);
    let ideal = ideal_symbol_size(&anchors, dim);
    let palette = Palette::new(config.palette_size);
    tracker.step(PROGRESS_PALETTE);

    let per_symbol = PROGRESS_SYMBOLS / symbols.len().max(1) as f32;
    let mut tiles = Vec::with_capacity(symbols.len());
    for (index, &symbol) in symbols.iter().enumerate() {
        let tile = prepare_symbol(
            symbol,
            seed_for_symbol(card_seed, index),
            ideal,
            &palette,
            provider,
            config.debug_logging,
        )?;
        tiles.push(tile);
        tracker.step(per_symbol);
    }
    if symbols.is_empty() {
        tracker.step(PROGRESS_SYMBOLS);
    }

    let anchor_px = anchor_pixels(&anchors, dim, ideal);
    let canvas_size = dim + FOREGROUND_MARGIN_PX;
    let mut canvas = RgbaImage::new(canvas_size, canvas_size);
    for (tile, &(x, y)) in tiles.iter().zip(&anchor_px) {
        imageops::overlay(&mut canvas, tile, x, y);
    }
    let foreground_image = center_cluster(&canvas, &anchor_px, ideal, config);
    tracker.step(PROGRESS_CLUSTER + PROGRESS_FINISH);

    let background_image =
        draw_ringed_disk(dim, BACKGROUND_FILL, BACKGROUND_OUTLINE, config.outline_width());
    tracker.step(PROGRESS_FINISH);

    let mut full_image = background_image.clone();
    imageops::overlay(&mut full_image, &foreground_image, 0, 0);
    tracker.finish();

    info!(
        card = card.index(),
        symbols = symbols.len(),
        ideal_symbol_size = ideal,
        "rendered card"
    );

    Ok(RenderResult {
        card_index: card.index(),
        symbols: symbols.to_vec(),
        full_image,
        foreground_image,
        background_image,
        dimensions: (dim, dim),
        symbols_per_card: symbols.len(),
        deck_symbol_count,
        spacing_multiplier: config.spacing_multiplier,
        calibrated_radius: calibration.radius,
        ideal_symbol_size: ideal,
        excess_points: calibration.excess.len(),
        rejected_points: calibration.rejected.len(),
    })
}

/// Rescales points so their joint coordinate range spans `[0, 1]`, keeping aspect ratio,
/// and re-sorts them from the center.
pub fn normalize_points(points: &[Vec2]) -> Vec<Vec2> {
    let (lo, hi) = points.iter().fold((f32::MAX, f32::MIN), |(lo, hi), p| {
        (lo.min(p.min_element()), hi.max(p.max_element()))
    });
    if points.len() < 2 || hi - lo <= f32::EPSILON {
        return vec![UNIT_CENTER; points.len()];
    }

    let mut out: Vec<Vec2> = points.iter().map(|&p| (p - lo) / (hi - lo)).collect();
    sort_by_center_distance(&mut out, UNIT_CENTER);
    out
}

/// Half the pixel distance between the two closest anchors.
///
/// Symbols of this size at neighboring anchors cannot overlap.
pub fn ideal_symbol_size(anchors: &[Vec2], output_dimension: u32) -> f32 {
    let mut nearest = f32::MAX;
    for i in 0..anchors.len() {
        for j in (i + 1)..anchors.len() {
            nearest = nearest.min(anchors[i].distance(anchors[j]));
        }
    }
    if anchors.len() < 2 {
        nearest = LONE_SYMBOL_DISTANCE;
    }
    nearest * (output_dimension as f32 / 2.0) / 2.0
}

/// Edge length of a symbol tile for a uniform draw `u` in `[0, 1)`.
pub fn symbol_size(ideal: f32, u: f32) -> u32 {
    let lo = ideal / 2.0 + SYMBOL_MARGIN_PX;
    let hi = ideal * 2.0 - SYMBOL_MARGIN_PX;
    let size = if hi > lo { lo + u * (hi - lo) } else { lo };
    (size as u32).max(MIN_SYMBOL_PX)
}

/// Whole-degree rotation in `0..=MAX_ROTATION_DEGREES` for a uniform draw `u` in `[0, 1)`.
pub fn rotation_degrees(u: f32) -> f32 {
    let steps = (MAX_ROTATION_DEGREES + 1) as f32;
    (u * steps).floor().clamp(0.0, MAX_ROTATION_DEGREES as f32)
}

fn anchor_pixels(anchors: &[Vec2], output_dimension: u32, ideal: f32) -> Vec<(i64, i64)> {
    let half = output_dimension as f32 / 2.0;
    anchors
        .iter()
        .map(|p| {
            let px = *p * half + Vec2::splat(half / 2.0 - ideal);
            (px.x as i64, px.y as i64)
        })
        .collect()
}

fn prepare_symbol(
    symbol: SymbolId,
    seed: u64,
    ideal: f32,
    palette: &Palette,
    provider: &dyn SymbolAssetProvider,
    verbose: bool,
) -> Result<RgbaImage> {
    let mut rng = StdRng::seed_from_u64(seed);
    let target_height = ((ideal * ASSET_OVERSAMPLE).round() as u32).max(1);

    let raster = provider
        .get_raster(symbol, target_height)
        .map_err(|e| match e {
            Error::AssetUnavailable { .. } => e,
            other => Error::asset_unavailable(symbol, other.to_string()),
        })?;
    let raster = crop_to_opaque(&raster);
    if raster.width() == 0 || raster.height() == 0 {
        return Err(Error::asset_unavailable(symbol, "raster is empty"));
    }

    let angle = rotation_degrees(rand01(&mut rng));
    let size = symbol_size(ideal, rand01(&mut rng));
    let mut tile = fit_to_square(&rotate_expand(&raster, angle), size);
    let color = palette.color_for(symbol);
    recolor(&mut tile, color);

    if verbose {
        debug!(symbol, ?color, size, angle, "imported symbol");
    } else {
        trace!(symbol, size, angle, "imported symbol");
    }
    Ok(tile)
}

/// Crops the symbol cluster, scales it to the inner card diameter and centers it on a
/// fresh transparent canvas.
fn center_cluster(
    canvas: &RgbaImage,
    anchor_px: &[(i64, i64)],
    ideal: f32,
    config: &RenderConfig,
) -> RgbaImage {
    let dim = config.output_dimension;
    let mut finished = RgbaImage::new(dim, dim);
    let anchors: Vec<DVec2> = anchor_px
        .iter()
        .map(|&(x, y)| DVec2::new(x as f64, y as f64))
        .collect();
    let Some(circle) = smallest_enclosing_circle(&anchors) else {
        return finished;
    };

    let pad = 2.0 * ideal as f64 - SYMBOL_MARGIN_PX as f64;
    let half_side = (circle.radius + pad).max(1.0);
    let side = ((2.0 * half_side).round() as u32).max(1);
    let cluster = crop_square_padded(
        canvas,
        (circle.center.x - half_side) as i64,
        (circle.center.y - half_side) as i64,
        side,
    );

    let inner = config.inner_diameter();
    let trimmed = crop_to_opaque(&resize_rgba(&cluster, inner, inner));
    let (w, h) = trimmed.dimensions();
    imageops::replace(
        &mut finished,
        &trimmed,
        (dim as i64 - w as i64) / 2,
        (dim as i64 - h as i64) / 2,
    );
    finished
}
