//! Card layout: turns a card's symbol list into a rendered card face.
//!
//! - [`calibrate`]: circle calibration selecting one sample point per symbol
//! - [`enclosing`]: smallest enclosing circle used for the final crop
//! - [`palette`]: symbol id to hue mapping
//! - [`raster`]: crop, rotate, resize, recolor and disk drawing
//! - [`provider`]: symbol artwork sources
//! - [`progress`]: progress sinks
//! - [`engine`]: the single-card pipeline
//! - [`batch`]: deck-wide rendering on a worker pool
pub mod batch;
pub mod calibrate;
pub mod config;
pub mod enclosing;
pub mod engine;
pub mod palette;
pub mod progress;
pub mod provider;
pub mod raster;

pub use batch::{render_deck, render_deck_collect, BatchSummary};
pub use calibrate::{calibrate, Calibration, CircleCalibrator};
pub use config::{BatchConfig, RenderConfig};
pub use engine::{render, CardRenderer, RenderResult};
pub use palette::Palette;
pub use progress::{FnProgress, ProgressSink, VecProgress};
pub use provider::{DirectoryAssetProvider, ProceduralAssetProvider, SymbolAssetProvider};
