//! Poisson disk sampling over the unit square.
use std::collections::VecDeque;
use std::f32::consts::{PI, SQRT_2};

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use crate::sampling::{rand01, sort_by_center_distance, PositionSampling, UNIT_CENTER};

/// Default number of candidates tried around each active point.
pub const DEFAULT_ATTEMPTS: usize = 100;

/// Poisson disk sampling strategy.
#[derive(Debug, Clone)]
pub struct PoissonDiskSampling {
    /// Minimum distance between samples, in unit-square units.
    pub radius: f32,
    /// Candidates tried around an active point before it is retired.
    pub attempts: usize,
}

impl PositionSampling for PoissonDiskSampling {
    fn generate(&self, rng: &mut dyn RngCore) -> Vec<Vec2> {
        if !self.radius.is_finite() || self.radius <= 0.0 || self.attempts == 0 {
            return Vec::new();
        }

        let mut sampler = PoissonDiskSampler::new(self.radius);
        let mut points = sampler.generate(rng, self.attempts);
        sort_by_center_distance(&mut points, UNIT_CENTER);
        debug!(radius = self.radius, points = points.len(), "poisson disk sampled");
        points
    }
}

impl PoissonDiskSampling {
    /// Create a new PoissonDiskSampling with specified radius.
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            attempts: DEFAULT_ATTEMPTS,
        }
    }

    /// Sets the candidate attempts per active point.
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// Samples with a fresh RNG seeded from `seed`.
    pub fn sample_seeded(&self, seed: u64) -> Vec<Vec2> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(&mut rng)
    }
}

struct PoissonDiskSampler {
    radius: f32,
    radius_squared: f32,
    cell_size: f32,
    grid_size: usize,
    grid: Vec<Option<Vec2>>,
    active_list: VecDeque<Vec2>,
}

impl PoissonDiskSampler {
    fn new(radius: f32) -> Self {
        debug_assert!(radius > 0.0);
        let cell_size = radius / SQRT_2;
        let grid_size = (1.0 / cell_size).ceil() as usize + 1;

        Self {
            radius,
            radius_squared: radius * radius,
            cell_size,
            grid_size,
            grid: vec![None; grid_size * grid_size],
            active_list: VecDeque::new(),
        }
    }

    #[inline]
    fn grid_index(&self, x: usize, y: usize) -> usize {
        y * self.grid_size + x
    }

    #[inline]
    fn point_to_grid(&self, point: Vec2) -> (usize, usize) {
        let max = self.grid_size as isize - 1;
        let x = ((point.x / self.cell_size).floor() as isize).clamp(0, max) as usize;
        let y = ((point.y / self.cell_size).floor() as isize).clamp(0, max) as usize;
        (x, y)
    }

    fn is_valid_point(&self, point: Vec2) -> bool {
        if point.x < 0.0 || point.x >= 1.0 || point.y < 0.0 || point.y >= 1.0 {
            return false;
        }

        let (gx, gy) = self.point_to_grid(point);
        let start_x = gx.saturating_sub(2);
        let end_x = (gx + 3).min(self.grid_size);
        let start_y = gy.saturating_sub(2);
        let end_y = (gy + 3).min(self.grid_size);

        for y in start_y..end_y {
            for x in start_x..end_x {
                if let Some(existing) = self.grid[self.grid_index(x, y)] {
                    if point.distance_squared(existing) < self.radius_squared {
                        return false;
                    }
                }
            }
        }

        true
    }

    fn add_point(&mut self, point: Vec2) {
        let (gx, gy) = self.point_to_grid(point);
        let idx = self.grid_index(gx, gy);
        self.grid[idx] = Some(point);
        self.active_list.push_back(point);
    }

    fn generate_around_point(
        &mut self,
        rng: &mut dyn RngCore,
        point: Vec2,
        attempts: usize,
    ) -> Option<Vec2> {
        for _ in 0..attempts {
            let angle = rand01(rng) * 2.0 * PI;
            let distance = self.radius + rand01(rng) * self.radius;
            let candidate = point + Vec2::new(angle.cos(), angle.sin()) * distance;

            if self.is_valid_point(candidate) {
                return Some(candidate);
            }
        }

        None
    }

    fn generate(&mut self, rng: &mut dyn RngCore, attempts: usize) -> Vec<Vec2> {
        let initial = Vec2::new(rand01(rng), rand01(rng));
        self.add_point(initial);
        let mut points = vec![initial];

        while let Some(active) = self.active_list.pop_front() {
            if let Some(p) = self.generate_around_point(rng, active, attempts) {
                self.add_point(p);
                points.push(p);
                self.active_list.push_back(active);
            }
        }

        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairwise_min_distance(points: &[Vec2]) -> f32 {
        let mut min = f32::MAX;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                min = min.min(points[i].distance(points[j]));
            }
        }
        min
    }

    #[test]
    fn sampler_initializes_grid_dimensions() {
        let sampler = PoissonDiskSampler::new(0.5);
        assert_eq!(
            sampler.grid_size,
            ((1.0 / sampler.cell_size).ceil() as usize) + 1
        );
    }

    #[test]
    fn is_valid_point_rejects_close_neighbors() {
        let mut sampler = PoissonDiskSampler::new(0.1);
        sampler.add_point(Vec2::new(0.5, 0.5));

        assert!(!sampler.is_valid_point(Vec2::new(0.55, 0.5)));
        assert!(sampler.is_valid_point(Vec2::new(0.65, 0.65)));
        assert!(!sampler.is_valid_point(Vec2::new(1.0, 0.2)));
        assert!(!sampler.is_valid_point(Vec2::new(-0.01, 0.2)));
    }

    #[test]
    fn generated_points_respect_radius_constraint() {
        let points = PoissonDiskSampling::new(0.05).sample_seeded(123);

        assert!(points.len() > 100);
        for p in &points {
            assert!(p.x >= 0.0 && p.x < 1.0);
            assert!(p.y >= 0.0 && p.y < 1.0);
        }
        assert!(pairwise_min_distance(&points) >= 0.05 - 1e-6);
    }

    #[test]
    fn points_cover_all_quadrants() {
        let points = PoissonDiskSampling::new(0.05).sample_seeded(9);
        let mut quadrants = [0usize; 4];
        for p in &points {
            let q = (p.x >= 0.5) as usize + 2 * (p.y >= 0.5) as usize;
            quadrants[q] += 1;
        }
        let total = points.len() as f32;
        for count in quadrants {
            assert!((count as f32) > total * 0.15, "uneven coverage: {quadrants:?}");
        }
    }

    #[test]
    fn output_is_sorted_from_center() {
        let points = PoissonDiskSampling::new(0.08).sample_seeded(5);
        for pair in points.windows(2) {
            assert!(pair[0].distance(UNIT_CENTER) <= pair[1].distance(UNIT_CENTER));
        }
    }

    #[test]
    fn same_seed_reproduces_points() {
        let sampling = PoissonDiskSampling::new(0.07);
        assert_eq!(sampling.sample_seeded(77), sampling.sample_seeded(77));
        assert_ne!(sampling.sample_seeded(77), sampling.sample_seeded(78));
    }

    #[test]
    fn zero_radius_returns_no_points() {
        assert!(PoissonDiskSampling::new(0.0).sample_seeded(1).is_empty());
        assert!(PoissonDiskSampling::new(f32::NAN).sample_seeded(1).is_empty());
    }
}
