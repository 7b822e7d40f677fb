//! Solid and gradient paints.

use crate::{Point, Rgba};

/// A colour at a position along a gradient, `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Geometry that maps a point to a gradient parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientShape {
    /// Parameter runs from 0 at `from` to 1 at `to`, projected onto the axis.
    Linear { from: Point, to: Point },
    /// Concentric circles: 0 at `inner_radius`, 1 at `outer_radius`.
    Radial {
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
    },
}

/// A gradient with colour stops kept in offset order.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    shape: GradientShape,
    stops: Vec<ColorStop>,
}

impl Gradient {
    pub fn linear(from: Point, to: Point) -> Self {
        Self {
            shape: GradientShape::Linear { from, to },
            stops: Vec::new(),
        }
    }

    pub fn radial(center: Point, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            shape: GradientShape::Radial {
                center,
                inner_radius,
                outer_radius,
            },
            stops: Vec::new(),
        }
    }

    /// Add a stop. Stops with equal offsets keep insertion order.
    pub fn with_stop(mut self, offset: f64, color: Rgba) -> Self {
        let offset = offset.clamp(0.0, 1.0);
        let index = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(index, ColorStop { offset, color });
        self
    }

    pub fn shape(&self) -> GradientShape {
        self.shape
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Gradient parameter at `point`, clamped to `[0, 1]`.
    pub fn param_at(&self, point: Point) -> f64 {
        let t = match self.shape {
            GradientShape::Linear { from, to } => {
                let dx = to.x - from.x;
                let dy = to.y - from.y;
                let len2 = dx * dx + dy * dy;
                if len2 == 0.0 {
                    0.0
                } else {
                    ((point.x - from.x) * dx + (point.y - from.y) * dy) / len2
                }
            }
            GradientShape::Radial {
                center,
                inner_radius,
                outer_radius,
            } => {
                let dist = center.distance_to(point);
                let span = outer_radius - inner_radius;
                if span <= 0.0 {
                    if dist >= outer_radius { 1.0 } else { 0.0 }
                } else {
                    (dist - inner_radius) / span
                }
            }
        };
        t.clamp(0.0, 1.0)
    }

    /// Colour at gradient parameter `t`.
    pub fn color_at_offset(&self, t: f64) -> Rgba {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba::TRANSPARENT;
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= 0.0 {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.offset) / span);
            }
        }
        last.color
    }

    pub fn color_at(&self, point: Point) -> Rgba {
        self.color_at_offset(self.param_at(point))
    }
}

/// How a shape is filled or stroked.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Gradient(Gradient),
}

impl Paint {
    pub fn color_at(&self, point: Point) -> Rgba {
        match self {
            Paint::Solid(color) => *color,
            Paint::Gradient(gradient) => gradient.color_at(point),
        }
    }
}

impl From<Rgba> for Paint {
    fn from(value: Rgba) -> Self {
        Paint::Solid(value)
    }
}

impl From<Gradient> for Paint {
    fn from(value: Gradient) -> Self {
        Paint::Gradient(value)
    }
}
