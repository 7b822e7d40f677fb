//! Transient shooting stars and their bounded collection.

use std::collections::VecDeque;
use std::f64::consts::PI;

use skyfolio_core::{Point, Viewport};

use crate::RandomSource;

/// Spawn region, as fractions of the viewport width and height.
const SPAWN_WIDTH_FRACTION: f64 = 0.6;
const SPAWN_HEIGHT_FRACTION: f64 = 0.4;
const LENGTH_MIN: f64 = 150.0;
const LENGTH_SPAN: f64 = 220.0;
const SPEED_MIN: f64 = 6.0;
const SPEED_SPAN: f64 = 6.0;
/// Heading down and to the right, about 63 degrees below horizontal.
const BASE_ANGLE: f64 = PI * 0.35;
const ANGLE_JITTER: f64 = 0.2;
/// Most shooting stars alive at once.
pub const MAX_SHOOTING_STARS: usize = 6;

/// A streak travelling in a straight line across the sky.
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    /// Head of the streak.
    pub position: Point,
    /// Direction of travel in radians.
    pub angle: f64,
    /// Distance travelled per frame.
    pub speed: f64,
    /// Trail length behind the head.
    pub length: f64,
    /// Milliseconds since spawn. Informational only.
    pub life: f64,
}

impl ShootingStar {
    /// Draw a shooting star starting in the upper-left part of `viewport`.
    pub fn random(viewport: Viewport, rng: &mut impl RandomSource) -> Self {
        let x = rng.next_f64() * viewport.width * SPAWN_WIDTH_FRACTION;
        let y = rng.next_f64() * viewport.height * SPAWN_HEIGHT_FRACTION;
        let length = rng.span(LENGTH_MIN, LENGTH_SPAN);
        let speed = rng.span(SPEED_MIN, SPEED_SPAN);
        let angle = BASE_ANGLE + (rng.next_f64() - 0.5) * ANGLE_JITTER;
        Self {
            position: Point::new(x, y),
            angle,
            speed,
            length,
            life: 0.0,
        }
    }

    /// Move one frame along the heading.
    pub fn advance(&mut self, delta_ms: f64) {
        self.life += delta_ms;
        self.position = self.position.offset(self.angle, self.speed);
    }

    /// End of the trail.
    pub fn tail(&self) -> Point {
        self.position.offset(self.angle, -self.length)
    }

    /// Whether the head has passed the right or bottom edge by more than `margin`.
    pub fn has_exited(&self, viewport: Viewport, margin: f64) -> bool {
        self.position.x > viewport.width + margin || self.position.y > viewport.height + margin
    }
}

/// Fixed-capacity queue of shooting stars; inserting past capacity evicts the oldest.
#[derive(Debug, Clone)]
pub struct ShootingStars {
    items: VecDeque<ShootingStar>,
    capacity: usize,
}

impl ShootingStars {
    /// Queue holding at most `capacity` stars, clamped to `1..=MAX_SHOOTING_STARS`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_SHOOTING_STARS);
        Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a star, returning the evicted oldest one if the queue was full.
    pub fn push(&mut self, star: ShootingStar) -> Option<ShootingStar> {
        self.items.push_back(star);
        if self.items.len() > self.capacity {
            self.items.pop_front()
        } else {
            None
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ShootingStar> {
        self.items.iter()
    }

    /// Visit every star mutably, dropping those for which `f` returns `false`.
    pub fn retain_mut(&mut self, f: impl FnMut(&mut ShootingStar) -> bool) {
        self.items.retain_mut(f);
    }
}
