use serde::{Deserialize, Serialize};

/// A linear RGBA colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Create a colour from all four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque colour.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Linear interpolation of all four channels. `t` is clamped to `0.0..=1.0`.
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;
        Self {
            r: start.r * inv + end.r * t,
            g: start.g * inv + end.g * t,
            b: start.b * inv + end.b * t,
            a: start.a * inv + end.a * t,
        }
    }

    /// Component-wise multiply of the colour channels. Alpha is kept from `self`.
    pub fn modulate(self, other: Self) -> Self {
        Self {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
            a: self.a,
        }
    }

    /// Scale the colour channels by `factor`, keeping alpha.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }

    /// Move each channel toward the channel average by `amount` (0 = unchanged, 1 = grey).
    pub fn desaturate(self, amount: f32) -> Self {
        let grey = (self.r + self.g + self.b) / 3.0;
        let grey = Self::new(grey, grey, grey, self.a);
        Self::lerp(self, grey, amount)
    }

    /// Return a copy with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Color::rgb(0.0, 0.0, 0.0);
        let b = Color::new(1.0, 0.5, 0.2, 0.0);
        assert_eq!(Color::lerp(a, b, 0.0), a);
        assert_eq!(Color::lerp(a, b, 1.0), b);
        let mid = Color::lerp(a, b, 0.5);
        assert!(close(mid.r, 0.5));
        assert!(close(mid.g, 0.25));
        assert!(close(mid.a, 0.5));
    }

    #[test]
    fn lerp_clamps_factor() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(Color::lerp(a, b, 4.0), b);
        assert_eq!(Color::lerp(a, b, -1.0), a);
    }

    #[test]
    fn desaturate_fully_is_grey() {
        let c = Color::rgb(0.9, 0.3, 0.0).desaturate(1.0);
        assert!(close(c.r, 0.4));
        assert!(close(c.g, 0.4));
        assert!(close(c.b, 0.4));
    }

    #[test]
    fn modulate_keeps_alpha() {
        let c = Color::new(0.5, 0.5, 0.5, 0.3).modulate(Color::rgb(0.5, 1.0, 0.0));
        assert!(close(c.r, 0.25));
        assert!(close(c.g, 0.5));
        assert!(close(c.b, 0.0));
        assert!(close(c.a, 0.3));
    }

    #[test]
    fn alpha_defaults_to_opaque_when_missing() {
        let c: Color = serde_json::from_str(r#"{"r":0.1,"g":0.2,"b":0.3}"#).unwrap();
        assert!(close(c.a, 1.0));
    }
}
