use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// A 2D point or offset in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate (up is positive).
    pub y: f32,
}

impl Vec2 {
    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Return this point moved by `(dx, dy)`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle that agents are kept inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest allowed x.
    pub min_x: f32,
    /// Largest allowed x.
    pub max_x: f32,
    /// Smallest allowed y.
    pub min_y: f32,
    /// Largest allowed y.
    pub max_y: f32,
}

impl Bounds {
    /// Create bounds from the two horizontal and two vertical limits.
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// `true` when the limits are finite and not inverted.
    pub fn is_valid(&self) -> bool {
        [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    /// Whether a point lies inside (edges included).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Clamp a point into the bounds. NaN coordinates collapse to the minimum edge.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            clamp_or_min(p.x, self.min_x, self.max_x),
            clamp_or_min(p.y, self.min_y, self.max_y),
        )
    }

    /// Screen-wrap a horizontal coordinate: leaving past one edge re-enters at the other.
    pub fn wrap_x(&self, x: f32) -> f32 {
        if x > self.max_x {
            self.min_x
        } else if x < self.min_x {
            self.max_x
        } else if x.is_nan() {
            self.min_x
        } else {
            x
        }
    }
}

fn clamp_or_min(v: f32, min: f32, max: f32) -> f32 {
    if v.is_nan() { min } else { v.clamp(min, max) }
}

/// Facing / travel direction along the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward negative x.
    Left,
    /// Toward positive x.
    Right,
}

impl Direction {
    /// `-1.0` for left, `+1.0` for right.
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Direction that points along `dx`. Zero counts as right.
    pub fn toward(dx: f32) -> Self {
        if dx < 0.0 { Self::Left } else { Self::Right }
    }

    /// Coin flip.
    pub fn random(rng: &mut StdRng) -> Self {
        if rng.random_bool(0.5) {
            Self::Right
        } else {
            Self::Left
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIELD: Bounds = Bounds::new(-20.0, 80.0, 0.0, 60.0);

    #[test]
    fn clamp_pulls_points_inside() {
        assert_eq!(FIELD.clamp(Vec2::new(-30.0, 70.0)), Vec2::new(-20.0, 60.0));
        assert_eq!(FIELD.clamp(Vec2::new(10.0, 5.0)), Vec2::new(10.0, 5.0));
    }

    #[test]
    fn clamp_handles_nan() {
        let p = FIELD.clamp(Vec2::new(f32::NAN, f32::NAN));
        assert_eq!(p, Vec2::new(-20.0, 0.0));
    }

    #[test]
    fn wrap_x_reenters_opposite_edge() {
        let sky = Bounds::new(-20.0, 100.0, 20.0, 70.0);
        assert_eq!(sky.wrap_x(100.5), -20.0);
        assert_eq!(sky.wrap_x(-20.5), 100.0);
        assert_eq!(sky.wrap_x(42.0), 42.0);
    }

    #[test]
    fn inverted_bounds_are_invalid() {
        assert!(FIELD.is_valid());
        assert!(!Bounds::new(5.0, 1.0, 0.0, 1.0).is_valid());
        assert!(!Bounds::new(0.0, f32::INFINITY, 0.0, 1.0).is_valid());
    }

    #[test]
    fn direction_from_delta() {
        assert_eq!(Direction::toward(-0.1), Direction::Left);
        assert_eq!(Direction::toward(3.0), Direction::Right);
        assert_eq!(Direction::Left.sign(), -1.0);
    }

    proptest! {
        #[test]
        fn clamped_points_are_contained(x in -1e6f32..1e6, y in -1e6f32..1e6) {
            prop_assert!(FIELD.contains(FIELD.clamp(Vec2::new(x, y))));
        }
    }
}
