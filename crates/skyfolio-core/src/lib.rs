//! Core types shared across the skyfolio crates.
//!
//! Holds the colour theme, plain geometry and colour values, gradient
//! paints, and the [`Surface`] trait the night-sky animation draws onto.

mod color;
mod geometry;
mod paint;
mod surface;
mod theme;

pub use color::Rgba;
pub use geometry::{Point, Viewport};
pub use paint::{ColorStop, Gradient, GradientShape, Paint};
pub use surface::Surface;
pub use theme::{Palette, ParseThemeError, Theme};
