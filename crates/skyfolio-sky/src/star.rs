//! Ambient twinkling stars.

use std::f64::consts::TAU;

use skyfolio_core::{Point, Viewport};

use crate::RandomSource;
use crate::session::SkyParams;

const RADIUS_MIN: f64 = 0.4;
const RADIUS_SPAN: f64 = 1.6;
const BASE_ALPHA_MIN: f64 = 0.25;
const BASE_ALPHA_SPAN: f64 = 0.7;
const TWINKLE_MIN: f64 = 0.002;
const TWINKLE_SPAN: f64 = 0.01;

/// A background star with a slow periodic brightness oscillation.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Position within the viewport at creation.
    pub position: Point,
    /// Circle radius, in `[0.4, 2.0)`.
    pub radius: f64,
    /// Peak opacity, in `[0.25, 0.95)`.
    pub base_alpha: f64,
    /// Phase advance per millisecond, in `[0.002, 0.012)`.
    pub twinkle_speed: f64,
    /// Twinkle angle accumulator.
    pub phase: f64,
}

impl Star {
    /// Draw a star uniformly placed in `viewport`.
    pub fn random(viewport: Viewport, rng: &mut impl RandomSource) -> Self {
        let x = rng.next_f64() * viewport.width;
        let y = rng.next_f64() * viewport.height;
        Self {
            position: Point::new(x, y),
            radius: rng.span(RADIUS_MIN, RADIUS_SPAN),
            base_alpha: rng.span(BASE_ALPHA_MIN, BASE_ALPHA_SPAN),
            twinkle_speed: rng.span(TWINKLE_MIN, TWINKLE_SPAN),
            phase: rng.next_f64() * TAU,
        }
    }

    /// Advance the twinkle by `delta_ms` milliseconds.
    pub fn advance(&mut self, delta_ms: f64) {
        self.phase += self.twinkle_speed * delta_ms;
    }

    /// Opacity at the current phase.
    pub fn alpha(&self) -> f64 {
        self.base_alpha * (0.6 + 0.4 * self.phase.sin())
    }
}

/// Number of stars for a viewport: one per `area_per_star`, at least `min_stars`.
pub fn star_count(viewport: Viewport, params: &SkyParams) -> usize {
    let by_area = if params.area_per_star > 0.0 {
        viewport.area() / params.area_per_star
    } else {
        0.0
    };
    by_area.max(params.min_stars as f64).round() as usize
}

/// Generate a full batch of stars for `viewport`.
pub(crate) fn generate(
    viewport: Viewport,
    params: &SkyParams,
    rng: &mut impl RandomSource,
) -> Vec<Star> {
    (0..star_count(viewport, params))
        .map(|_| Star::random(viewport, rng))
        .collect()
}
