//! RGBA color type

use serde::{Deserialize, Serialize};

/// RGBA color with components in `[0.0, 1.0]`
///
/// Alpha here is the color's own opacity; per-particle opacity is applied
/// on top of it at draw time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const TRANSPARENT: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    /// Create a new color from RGBA components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from a packed `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Return this color with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Return this color with its alpha multiplied by `factor`
    ///
    /// Used for depth-scaled opacity and fade-out; the result is clamped so
    /// repeated scaling cannot push alpha outside `[0, 1]`.
    pub fn scale_alpha(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear interpolation between two colors
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Convert to 8-bit RGBA, clamping each component
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let gold = Rgba::from_hex(0xFFD700);
        assert!((gold.r - 1.0).abs() < 1e-6);
        assert!((gold.g - 215.0 / 255.0).abs() < 1e-6);
        assert!(gold.b.abs() < 1e-6);
        assert_eq!(gold.a, 1.0);
    }

    #[test]
    fn test_with_alpha() {
        let c = Rgba::WHITE.with_alpha(0.5);
        assert_eq!(c.a, 0.5);
        assert_eq!(c.r, 1.0);
    }

    #[test]
    fn test_scale_alpha_clamps() {
        let c = Rgba::WHITE.scale_alpha(2.0);
        assert_eq!(c.a, 1.0);
        let c = Rgba::WHITE.scale_alpha(-1.0);
        assert_eq!(c.a, 0.0);
        let c = Rgba::new(1.0, 1.0, 1.0, 0.8).scale_alpha(0.5);
        assert!((c.a - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_lerp() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.g - 0.5).abs() < 1e-6);
        assert!((mid.b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_to_rgba8() {
        assert_eq!(Rgba::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Rgba::TRANSPARENT.to_rgba8(), [0, 0, 0, 0]);
        // Out-of-range components clamp instead of wrapping
        assert_eq!(Rgba::new(2.0, -1.0, 0.5, 1.0).to_rgba8()[0], 255);
        assert_eq!(Rgba::new(2.0, -1.0, 0.5, 1.0).to_rgba8()[1], 0);
    }
}
