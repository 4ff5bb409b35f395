//! Smallest enclosing circle of a planar point set.
use glam::DVec2;

const CONTAINS_EPSILON: f64 = 1e-12;

/// A circle in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, p: DVec2) -> bool {
        self.center.distance(p) <= self.radius * (1.0 + CONTAINS_EPSILON) + CONTAINS_EPSILON
    }

    fn diameter(a: DVec2, b: DVec2) -> Self {
        let center = (a + b) / 2.0;
        Self::new(center, center.distance(a).max(center.distance(b)))
    }

    fn circumscribed(a: DVec2, b: DVec2, c: DVec2) -> Option<Self> {
        let min = a.min(b).min(c);
        let max = a.max(b).max(c);
        let o = (min + max) / 2.0;
        let (a, b, c) = (a - o, b - o, c - o);
        let d = (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)) * 2.0;
        if d == 0.0 {
            return None;
        }
        let (la, lb, lc) = (a.length_squared(), b.length_squared(), c.length_squared());
        let center = DVec2::new(
            (la * (b.y - c.y) + lb * (c.y - a.y) + lc * (a.y - b.y)) / d,
            (la * (c.x - b.x) + lb * (a.x - c.x) + lc * (b.x - a.x)) / d,
        );
        let radius = [a, b, c]
            .iter()
            .map(|p| center.distance(*p))
            .fold(0.0, f64::max);
        Some(Self::new(center + o, radius))
    }
}

/// Returns the smallest circle containing every point, or `None` for an empty set.
///
/// Iterative Welzl construction over the points in their given order, so the result
/// is deterministic for a fixed input.
pub fn smallest_enclosing_circle(points: &[DVec2]) -> Option<Circle> {
    let mut circle: Option<Circle> = None;
    for (i, &p) in points.iter().enumerate() {
        if circle.is_none_or(|c| !c.contains(p)) {
            circle = Some(circle_with_one_point(&points[..i], p));
        }
    }
    circle
}

fn circle_with_one_point(points: &[DVec2], p: DVec2) -> Circle {
    let mut circle = Circle::new(p, 0.0);
    for (i, &q) in points.iter().enumerate() {
        if !circle.contains(q) {
            circle = if circle.radius == 0.0 {
                Circle::diameter(p, q)
            } else {
                circle_with_two_points(&points[..i], p, q)
            };
        }
    }
    circle
}

fn circle_with_two_points(points: &[DVec2], p: DVec2, q: DVec2) -> Circle {
    let base = Circle::diameter(p, q);
    let mut left: Option<Circle> = None;
    let mut right: Option<Circle> = None;

    for &r in points {
        if base.contains(r) {
            continue;
        }
        let turn = cross(p, q, r);
        let Some(c) = Circle::circumscribed(p, q, r) else {
            continue;
        };
        let side = cross(p, q, c.center);
        if turn > 0.0 && left.is_none_or(|l| side > cross(p, q, l.center)) {
            left = Some(c);
        } else if turn < 0.0 && right.is_none_or(|rc| side < cross(p, q, rc.center)) {
            right = Some(c);
        }
    }

    match (left, right) {
        (None, None) => base,
        (Some(l), None) => l,
        (None, Some(r)) => r,
        (Some(l), Some(r)) => {
            if l.radius <= r.radius {
                l
            } else {
                r
            }
        }
    }
}

#[inline]
fn cross(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}
