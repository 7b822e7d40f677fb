//! RGBA colour values.

use ratatui::style::Color;

/// An sRGB colour with straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same colour with a different alpha, clamped to `[0, 1]`.
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear interpolation of every channel, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Channels as floats in `[0, 1]`, alpha premultiplied.
    pub fn premultiplied(self) -> [f64; 4] {
        let a = self.a.clamp(0.0, 1.0);
        [
            self.r as f64 / 255.0 * a,
            self.g as f64 / 255.0 * a,
            self.b as f64 / 255.0 * a,
            a,
        ]
    }

    /// Terminal colour, ignoring alpha.
    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl From<Rgba> for Color {
    fn from(value: Rgba) -> Self {
        value.to_color()
    }
}
