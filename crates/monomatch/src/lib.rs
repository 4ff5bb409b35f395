#![forbid(unsafe_code)]
//! monomatch: matching-card decks over finite projective planes, rendered as blue-noise card faces.
//!
//! Modules:
//! - deck: build decks where every pair of cards shares exactly one symbol
//! - sampling: seeded Poisson-disk sampling over the unit square
//! - layout: calibration, symbol sizing and recoloring, compositing, batch rendering
//!
//! For examples, see the `monomatch_examples` crate.
pub mod deck;
pub mod error;
pub mod layout;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use monomatch::prelude::*;`.
pub mod prelude {
    pub use crate::deck::{
        build_by_order, build_by_target_cards, build_by_target_dimension, Card, Deck, SymbolId,
    };
    pub use crate::error::{Error, Result};
    pub use crate::layout::{
        calibrate, render, render_deck, render_deck_collect, BatchConfig, BatchSummary,
        Calibration, CardRenderer, CircleCalibrator, DirectoryAssetProvider, FnProgress, Palette,
        ProceduralAssetProvider, ProgressSink, RenderConfig, RenderResult, SymbolAssetProvider,
        VecProgress,
    };
    pub use crate::sampling::{
        seed_for_symbol, seed_for_symbols, PoissonDiskSampling, PositionSampling, UNIT_CENTER,
    };
}
