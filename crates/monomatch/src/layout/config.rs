//! Render and batch configuration.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::palette::DEFAULT_PALETTE_SIZE;
use crate::sampling::poisson_disk::DEFAULT_ATTEMPTS;

/// Border band width as a fraction of the output dimension (128 px at 4096 px).
pub const BORDER_BAND_RATIO: f64 = 128.0 / 4096.0;

/// Configuration for rendering a single card.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderConfig {
    /// Width and height of the square output images in pixels.
    pub output_dimension: u32,
    /// Sample separation in pixels; the normalized separation is this over the output dimension.
    pub spacing_multiplier: u32,
    /// Raises per-symbol and calibration diagnostics from trace to debug level.
    pub debug_logging: bool,
    /// Number of hues in the symbol palette.
    pub palette_size: usize,
    /// Candidate attempts per active point in the blue-noise sampler.
    pub sampler_attempts: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dimension: 4096,
            spacing_multiplier: 128,
            debug_logging: false,
            palette_size: DEFAULT_PALETTE_SIZE,
            sampler_attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`] with the given output dimension.
    pub fn new(output_dimension: u32) -> Self {
        Self {
            output_dimension,
            ..Default::default()
        }
    }

    /// Sets the spacing multiplier.
    pub fn with_spacing_multiplier(mut self, spacing_multiplier: u32) -> Self {
        self.spacing_multiplier = spacing_multiplier;
        self
    }

    /// Enables or disables debug-level diagnostics.
    pub fn with_debug_logging(mut self, debug_logging: bool) -> Self {
        self.debug_logging = debug_logging;
        self
    }

    /// Sets the palette size.
    pub fn with_palette_size(mut self, palette_size: usize) -> Self {
        self.palette_size = palette_size;
        self
    }

    /// Sets the sampler candidate attempts.
    pub fn with_sampler_attempts(mut self, sampler_attempts: usize) -> Self {
        self.sampler_attempts = sampler_attempts;
        self
    }

    /// Minimum separation between sample points in unit-square units.
    pub fn min_separation(&self) -> f32 {
        self.spacing_multiplier as f32 / self.output_dimension as f32
    }

    /// Width of the border band around the card face in pixels.
    pub fn border_band(&self) -> u32 {
        (self.output_dimension as f64 * BORDER_BAND_RATIO) as u32
    }

    /// Diameter the symbol cluster is scaled to before centering.
    pub fn inner_diameter(&self) -> u32 {
        let band = self.border_band();
        self.output_dimension
            .saturating_sub(band)
            .saturating_sub(band / 2)
            .max(1)
    }

    /// Width of the outline ring drawn around the background disk.
    pub fn outline_width(&self) -> u32 {
        self.border_band() / 2
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.output_dimension == 0 {
            return Err(Error::InvalidConfig("output_dimension must be > 0".into()));
        }
        if self.spacing_multiplier == 0 {
            return Err(Error::InvalidConfig("spacing_multiplier must be > 0".into()));
        }
        if self.palette_size == 0 {
            return Err(Error::InvalidConfig("palette_size must be > 0".into()));
        }
        if self.sampler_attempts == 0 {
            return Err(Error::InvalidConfig("sampler_attempts must be > 0".into()));
        }
        Ok(())
    }
}

/// Default number of render workers for a deck batch.
pub const DEFAULT_WORKERS: usize = 10;

/// Configuration for rendering every card of a deck.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatchConfig {
    /// Number of worker threads.
    pub workers: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

impl BatchConfig {
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    /// Sets the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::InvalidConfig("workers must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_card() {
        let config = RenderConfig::default();
        assert_eq!(config.output_dimension, 4096);
        assert_eq!(config.spacing_multiplier, 128);
        assert_eq!(config.palette_size, 128);
        assert_eq!(config.border_band(), 128);
        assert_eq!(config.inner_diameter(), 4096 - 128 - 64);
        assert_eq!(config.outline_width(), 64);
        assert!((config.min_separation() - 0.03125).abs() < 1e-9);
        config.validate().unwrap();
    }

    #[test]
    fn validate_rejects_zero_fields() {
        assert!(RenderConfig::new(0).validate().is_err());
        assert!(RenderConfig::new(512)
            .with_spacing_multiplier(0)
            .validate()
            .is_err());
        assert!(RenderConfig::new(512)
            .with_palette_size(0)
            .validate()
            .is_err());
        assert!(RenderConfig::new(512)
            .with_sampler_attempts(0)
            .validate()
            .is_err());
    }

    #[test]
    fn builders_set_fields() {
        let config = RenderConfig::new(256)
            .with_spacing_multiplier(8)
            .with_debug_logging(true)
            .with_palette_size(16)
            .with_sampler_attempts(30);
        assert_eq!(config.output_dimension, 256);
        assert_eq!(config.spacing_multiplier, 8);
        assert!(config.debug_logging);
        assert_eq!(config.palette_size, 16);
        assert_eq!(config.sampler_attempts, 30);
    }

    #[test]
    fn batch_config_requires_workers() {
        assert_eq!(BatchConfig::default().workers, 10);
        assert!(BatchConfig::new(0).validate().is_err());
        BatchConfig::default().with_workers(2).validate().unwrap();
    }
}
