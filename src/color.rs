//! RGBA colour values plus the few colour-space helpers the renderers need.

use image::Rgba;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

/// An 8-bit straight-alpha RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::hex(0x000000);

    /// Opaque colour from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 255,
        }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with alpha replaced by `opacity` (0.0-1.0, clamped).
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: unit_to_u8(opacity),
            ..self
        }
    }

    /// Multiplies the existing alpha by `factor` (clamped to 0.0-1.0).
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: unit_to_u8(self.a as f32 / 255.0 * factor),
            ..self
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }

    pub fn from_rgba(pixel: Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self { r, g, b, a }
    }

    fn to_srgb(self) -> Srgb {
        Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    fn from_srgb(rgb: Srgb, a: u8) -> Self {
        Self {
            r: unit_to_u8(rgb.red),
            g: unit_to_u8(rgb.green),
            b: unit_to_u8(rgb.blue),
            a,
        }
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        color.to_rgba()
    }
}

fn unit_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ============================================================================
// Colour Utilities
// ============================================================================

/// Darkens a colour by reducing its HSL lightness.
pub fn darken(color: Color, amount: f32) -> Color {
    let mut hsl: Hsl = color.to_srgb().into_color();
    hsl.lightness = (hsl.lightness - amount).max(0.0);
    let darkened: Srgb = hsl.into_color();
    Color::from_srgb(darkened, color.a)
}

/// Lightens a colour by raising its HSL lightness.
pub fn lighten(color: Color, amount: f32) -> Color {
    let mut hsl: Hsl = color.to_srgb().into_color();
    hsl.lightness = (hsl.lightness + amount).min(1.0);
    let lightened: Srgb = hsl.into_color();
    Color::from_srgb(lightened, color.a)
}

/// Mixes two colours in linear light. `factor` 0.0 is `from`, 1.0 is `to`.
///
/// Alpha is interpolated linearly.
pub fn mix(from: Color, to: Color, factor: f32) -> Color {
    let factor = factor.clamp(0.0, 1.0);
    let a: LinSrgb = from.to_srgb().into_linear();
    let b: LinSrgb = to.to_srgb().into_linear();
    let mixed = Srgb::from_linear(a.mix(b, factor));
    let alpha = from.a as f32 + (to.a as f32 - from.a as f32) * factor;
    Color::from_srgb(mixed, alpha.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literal_unpacks_channels() {
        let c = Color::hex(0x8a8a88);
        assert_eq!((c.r, c.g, c.b, c.a), (0x8a, 0x8a, 0x88, 255));
    }

    #[test]
    fn opacity_maps_to_byte_alpha() {
        let c = Color::rgb(80, 30, 20);
        assert_eq!(c.with_opacity(0.6).a, 153);
        assert_eq!(c.with_opacity(0.5).a, 128);
        assert_eq!(c.with_opacity(-0.2).a, 0);
        assert_eq!(c.with_opacity(0.5).fade(0.5).a, 64);
    }

    #[test]
    fn darken_reduces_lightness() {
        let base = Color::hex(0x8a8a88);
        let dark = darken(base, 0.2);
        assert!(dark.r < base.r && dark.g < base.g);
        assert_eq!(dark.a, 255);

        let light = lighten(base, 0.2);
        assert!(light.r > base.r);
    }

    #[test]
    fn mix_endpoints_are_exact() {
        let a = Color::hex(0x0a0908);
        let b = Color::hex(0xff8040);
        assert_eq!(mix(a, b, 0.0), a);
        assert_eq!(mix(a, b, 1.0), b);

        let mid = mix(a, b, 0.5);
        assert!(mid.r > a.r && mid.r < b.r);
    }
}
