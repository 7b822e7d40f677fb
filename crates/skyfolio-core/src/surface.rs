//! The 2-D drawing surface the sky animation paints onto.

use crate::{Paint, Point, Viewport};

/// A 2-D drawing context covering the whole viewport, in logical units.
///
/// Drawing composites source-over onto whatever was painted since the last
/// [`Surface::clear`].
pub trait Surface {
    /// Current drawable size.
    fn viewport(&self) -> Viewport;

    /// Reset every pixel to fully transparent.
    fn clear(&mut self);

    /// Fill the half-open axis-aligned rectangle at `origin` with size `size`.
    fn fill_rect(&mut self, origin: Point, size: Viewport, paint: &Paint);

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint);

    /// Stroke a straight segment `width` units wide.
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, paint: &Paint);
}
