//! Blue-noise point sampling for card layouts.
//!
//! Points live in the unit square `[0, 1)²` and are returned sorted by distance from
//! its center so that downstream selection is reproducible.
use glam::Vec2;
use rand::RngCore;

pub mod poisson_disk;
pub mod seed;

pub use poisson_disk::PoissonDiskSampling;
pub use seed::{seed_for_symbol, seed_for_symbols};

/// Center of the unit square.
pub const UNIT_CENTER: Vec2 = Vec2::new(0.5, 0.5);

/// Trait for point sampling over the unit square.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, rng: &mut dyn RngCore) -> Vec<Vec2>;
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Sorts `points` by Euclidean distance from `center`, nearest first.
///
/// The sort is stable, so equidistant points keep their generation order.
pub fn sort_by_center_distance(points: &mut [Vec2], center: Vec2) {
    points.sort_by(|a, b| {
        a.distance_squared(center)
            .total_cmp(&b.distance_squared(center))
    });
}
