//! Circular region calibration around the card center.
//!
//! Given center-sorted sample points, [`CircleCalibrator`] finds a radius that holds
//! at least the required number of points and partitions the samples into selected,
//! excess and rejected sets.
use glam::Vec2;
use tracing::debug;

use crate::error::{Error, Result};

/// Ratio between the coarse growth step and the fine shrink step.
pub const FINE_STEP_DIVISOR: f32 = 8.0;

/// Outcome of a calibration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calibration {
    /// Final circle radius in unit-square units.
    pub radius: f32,
    /// The first `required` points strictly inside the circle.
    pub selected: Vec<Vec2>,
    /// Further points strictly inside the circle.
    pub excess: Vec<Vec2>,
    /// Points on or outside the circle.
    pub rejected: Vec<Vec2>,
}

/// Grows and shrinks a circle until it holds the required number of points.
#[derive(Debug, Clone, Copy)]
pub struct CircleCalibrator {
    /// Radius the search starts from.
    pub initial_radius: f32,
    /// Growth increment; the shrink increment is this divided by [`FINE_STEP_DIVISOR`].
    pub coarse_step: f32,
}

impl CircleCalibrator {
    /// Calibrator starting at the sampling separation and growing by half of it.
    pub fn new(separation: f32) -> Self {
        Self {
            initial_radius: separation,
            coarse_step: separation / 2.0,
        }
    }

    pub fn with_coarse_step(mut self, coarse_step: f32) -> Self {
        self.coarse_step = coarse_step;
        self
    }

    /// Calibrates around `center`, selecting `required` of `points`.
    ///
    /// `points` are expected in ascending distance from `center`; selection keeps that
    /// order. Fails with [`Error::InsufficientDensity`] when the circle covers the whole
    /// unit square and still holds fewer than `required` points, and with
    /// [`Error::InvalidConfig`] when the step is too small to move an `f32` radius.
    pub fn calibrate(&self, points: &[Vec2], center: Vec2, required: usize) -> Result<Calibration> {
        let max_radius = covering_radius(center) + self.coarse_step;
        if !(self.coarse_step.is_finite() && self.coarse_step > 0.0)
            || !self.initial_radius.is_finite()
        {
            return Err(Error::InvalidConfig(format!(
                "calibration steps must be finite and positive (initial {}, step {})",
                self.initial_radius, self.coarse_step
            )));
        }
        if self.coarse_step < f32::EPSILON * max_radius {
            return Err(Error::InvalidConfig(format!(
                "calibration step {} is below the radius precision",
                self.coarse_step
            )));
        }

        if points.len() < required {
            return Err(Error::InsufficientDensity {
                required,
                available: points.len(),
            });
        }

        // Radii are derived from step counts so every iteration is bounded.
        let fine_step = self.coarse_step / FINE_STEP_DIVISOR;
        let start = self.initial_radius.max(0.0);
        let max_grow_steps = ((max_radius - start) / self.coarse_step).ceil().max(0.0) as usize;

        let mut grow_steps = 0usize;
        let mut radius = start;
        let mut inside = count_inside(points, center, radius);
        while inside < required {
            if grow_steps >= max_grow_steps {
                return Err(Error::InsufficientDensity {
                    required,
                    available: inside,
                });
            }
            grow_steps += 1;
            radius = start + grow_steps as f32 * self.coarse_step;
            inside = count_inside(points, center, radius);
        }

        let grown = radius;
        let max_shrink_steps = (grown / fine_step).ceil() as usize;
        let mut shrink_steps = 0usize;
        while inside > required && shrink_steps < max_shrink_steps {
            shrink_steps += 1;
            radius = grown - shrink_steps as f32 * fine_step;
            inside = count_inside(points, center, radius);
        }
        radius = grown - (shrink_steps as f32 - 1.0) * fine_step;

        let mut calibration = Calibration {
            radius,
            ..Default::default()
        };
        for &p in points {
            if p.distance(center) < radius {
                if calibration.selected.len() < required {
                    calibration.selected.push(p);
                } else {
                    calibration.excess.push(p);
                }
            } else {
                calibration.rejected.push(p);
            }
        }

        debug!(
            radius,
            selected = calibration.selected.len(),
            excess = calibration.excess.len(),
            rejected = calibration.rejected.len(),
            "calibrated circle"
        );
        Ok(calibration)
    }
}

/// Calibrates with a [`CircleCalibrator`] derived from `separation`.
pub fn calibrate(
    points: &[Vec2],
    center: Vec2,
    required: usize,
    separation: f32,
) -> Result<Calibration> {
    CircleCalibrator::new(separation).calibrate(points, center, required)
}

fn count_inside(points: &[Vec2], center: Vec2, radius: f32) -> usize {
    points.iter().filter(|p| p.distance(center) < radius).count()
}

/// Radius from `center` that reaches every corner of the unit square.
fn covering_radius(center: Vec2) -> f32 {
    [
        Vec2::ZERO,
        Vec2::X,
        Vec2::Y,
        Vec2::ONE,
    ]
    .iter()
    .map(|corner| corner.distance(center))
    .fold(0.0, f32::max)
}
