//! Animation session: particle state plus the per-frame update and paint.

use skyfolio_core::{Gradient, Paint, Point, Rgba, Surface, Viewport};

use crate::RandomSource;
use crate::shooting::{ShootingStar, ShootingStars};
use crate::star::{self, Star};

/// Inner radius of the backdrop glow.
const BACKDROP_INNER_RADIUS: f64 = 20.0;
/// Backdrop glow centre, as fractions of the viewport.
const BACKDROP_CENTER: (f64, f64) = (0.45, 0.5);
const BACKDROP_STOPS: [(f64, Rgba); 3] = [
    (0.0, Rgba::new(118, 185, 224, 0.06)),
    (0.3, Rgba::new(55, 66, 221, 0.04)),
    (1.0, Rgba::new(0, 0, 0, 0.0)),
];

const TRAIL_WIDTH: f64 = 2.0;
const TRAIL_STOPS: [(f64, Rgba); 3] = [
    (0.0, Rgba::new(180, 255, 255, 0.95)),
    (0.7, Rgba::new(90, 200, 220, 0.6)),
    (1.0, Rgba::new(40, 80, 100, 0.0)),
];

/// Tunable constants of the animation.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyParams {
    /// Lower bound on the star batch size.
    pub min_stars: usize,
    /// Viewport area per star.
    pub area_per_star: f64,
    /// Chance that a spawn-timer tick produces a shooting star.
    pub spawn_probability: f64,
    /// Maximum concurrent shooting stars.
    pub max_shooting_stars: usize,
    /// Distance past the right/bottom edge at which a shooting star is dropped.
    pub exit_margin: f64,
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            min_stars: 120,
            area_per_star: 12_000.0,
            spawn_probability: 0.7,
            max_shooting_stars: 6,
            exit_margin: 100.0,
        }
    }
}

/// The night-sky animation state for one run of the app.
#[derive(Debug)]
pub struct SkySession<R = fastrand::Rng> {
    /// Current drawable size in logical units.
    viewport: Viewport,
    /// Twinkling background stars, regenerated on every resize.
    stars: Vec<Star>,
    /// Active shooting stars, oldest first.
    shooting: ShootingStars,
    /// Timestamp of the previous frame in milliseconds.
    last_frame_ms: f64,
    rng: R,
    params: SkyParams,
}

impl<R: RandomSource> SkySession<R> {
    /// Create an empty session. Call [`SkySession::resize`] to mount it.
    pub fn new(params: SkyParams, rng: R, now_ms: f64) -> Self {
        Self {
            viewport: Viewport::default(),
            stars: Vec::new(),
            shooting: ShootingStars::new(params.max_shooting_stars),
            last_frame_ms: now_ms,
            rng,
            params,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn shooting_stars(&self) -> &ShootingStars {
        &self.shooting
    }

    pub fn params(&self) -> &SkyParams {
        &self.params
    }

    /// Adopt a new viewport and regenerate the whole star batch.
    ///
    /// Shooting stars are kept as they are.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.stars = star::generate(viewport, &self.params, &mut self.rng);
        log::debug!(
            "sky resized to {:.0}x{:.0}, {} stars",
            viewport.width,
            viewport.height,
            self.stars.len()
        );
    }

    /// Launch a shooting star, evicting the oldest if at capacity.
    pub fn spawn(&mut self) {
        let star = ShootingStar::random(self.viewport, &mut self.rng);
        log::trace!(
            "shooting star at ({:.0}, {:.0}), speed {:.1}",
            star.position.x,
            star.position.y,
            star.speed
        );
        if self.shooting.push(star).is_some() {
            log::trace!("evicted oldest shooting star");
        }
    }

    /// Periodic spawn tick. Returns whether a star was launched.
    pub fn on_spawn_timer(&mut self) -> bool {
        let fire = self.rng.next_f64() < self.params.spawn_probability;
        if fire {
            self.spawn();
        }
        fire
    }

    /// A pointer click always launches a star.
    pub fn on_click(&mut self) {
        self.spawn();
    }

    /// Advance every particle to `now_ms` and paint the frame onto `surface`.
    pub fn frame<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) {
        let delta_ms = now_ms - self.last_frame_ms;
        self.last_frame_ms = now_ms;

        surface.clear();
        self.paint_backdrop(surface);

        for star in &mut self.stars {
            star.advance(delta_ms);
            let paint = Paint::Solid(Rgba::WHITE.with_alpha(star.alpha()));
            surface.fill_circle(star.position, star.radius, &paint);
        }

        let viewport = self.viewport;
        let margin = self.params.exit_margin;
        self.shooting.retain_mut(|shooting| {
            shooting.advance(delta_ms);
            let tail = shooting.tail();
            let trail = TRAIL_STOPS
                .iter()
                .fold(Gradient::linear(shooting.position, tail), |g, (offset, color)| {
                    g.with_stop(*offset, *color)
                });
            surface.stroke_line(shooting.position, tail, TRAIL_WIDTH, &Paint::Gradient(trail));
            !shooting.has_exited(viewport, margin)
        });
    }

    /// Soft off-centre glow behind the stars.
    fn paint_backdrop<S: Surface + ?Sized>(&self, surface: &mut S) {
        let v = self.viewport;
        let center = Point::new(v.width * BACKDROP_CENTER.0, v.height * BACKDROP_CENTER.1);
        let glow = BACKDROP_STOPS.iter().fold(
            Gradient::radial(center, BACKDROP_INNER_RADIUS, v.max_side()),
            |g, (offset, color)| g.with_stop(*offset, *color),
        );
        surface.fill_rect(Point::default(), v, &Paint::Gradient(glow));
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::random::ScriptedRandom;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Rect,
        Circle(Point, f64, Rgba),
        Line(Point, Point),
    }

    #[derive(Default)]
    struct Recorder {
        viewport: Viewport,
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn viewport(&self) -> Viewport {
            self.viewport
        }

        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn fill_rect(&mut self, _origin: Point, _size: Viewport, _paint: &Paint) {
            self.ops.push(Op::Rect);
        }

        fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
            self.ops.push(Op::Circle(center, radius, paint.color_at(center)));
        }

        fn stroke_line(&mut self, from: Point, to: Point, _width: f64, _paint: &Paint) {
            self.ops.push(Op::Line(from, to));
        }
    }

    fn session(viewport: Viewport) -> SkySession<fastrand::Rng> {
        let mut s = SkySession::new(SkyParams::default(), fastrand::Rng::with_seed(1), 0.0);
        s.resize(viewport);
        s
    }

    fn parked(x: f64, speed: f64) -> ShootingStar {
        ShootingStar {
            position: Point::new(x, 0.0),
            angle: 0.0,
            speed,
            length: 150.0,
            life: 0.0,
        }
    }

    #[test]
    fn test_resize_regenerates_full_batch() {
        let mut s = session(Viewport::new(4000.0, 3000.0));
        assert_eq!(s.stars().len(), 1000);

        let before = s.stars().to_vec();
        s.resize(Viewport::new(4000.0, 3000.0));
        assert_eq!(s.stars().len(), 1000);
        assert_ne!(s.stars(), before.as_slice());

        s.resize(Viewport::new(1200.0, 800.0));
        assert_eq!(s.stars().len(), 120);
        assert!(s.stars().iter().all(|st| st.position.x < 1200.0 && st.position.y < 800.0));
    }

    #[test]
    fn test_resize_keeps_shooting_stars() {
        let mut s = session(Viewport::new(1200.0, 800.0));
        s.spawn();
        s.spawn();
        s.resize(Viewport::new(300.0, 200.0));
        assert_eq!(s.shooting_stars().len(), 2);
    }

    #[test]
    fn test_spawn_with_fixed_draws_then_frame() {
        let mut s = SkySession::new(SkyParams::default(), ScriptedRandom::new(&[0.5]), 0.0);
        s.resize(Viewport::new(1200.0, 800.0));
        s.rng = ScriptedRandom::new(&[0.0, 0.0, 0.0, 0.0, 0.5]);
        s.on_click();
        s.frame(16.0, &mut Recorder::default());

        let star = s.shooting_stars().iter().next().cloned().unwrap();
        assert!((star.position.x - (0.35 * PI).cos() * 6.0).abs() < 1e-12);
        assert!((star.position.y - (0.35 * PI).sin() * 6.0).abs() < 1e-12);
        assert_eq!(star.life, 16.0);
    }

    #[test]
    fn test_seven_spawns_keep_last_six() {
        let mut s = SkySession::new(SkyParams::default(), ScriptedRandom::new(&[0.0]), 0.0);
        s.resize(Viewport::new(1200.0, 800.0));
        // Each spawn draws x, y, length, speed, angle.
        let mut draws = Vec::new();
        for i in 0..7 {
            draws.extend([0.0, 0.0, 0.0, i as f64 / 10.0, 0.5]);
        }
        s.rng = ScriptedRandom::new(&draws);
        for _ in 0..7 {
            s.spawn();
        }
        let speeds: Vec<f64> = s.shooting_stars().iter().map(|st| st.speed).collect();
        let expected: Vec<f64> = (1..7).map(|i| 6.0 + i as f64 / 10.0 * 6.0).collect();
        assert_eq!(speeds, expected);
    }

    #[test]
    fn test_timer_spawns_below_probability() {
        let mut s = SkySession::new(SkyParams::default(), ScriptedRandom::new(&[0.5]), 0.0);
        s.resize(Viewport::new(1200.0, 800.0));

        s.rng = ScriptedRandom::new(&[0.69, 0.1, 0.1, 0.1, 0.1, 0.5]);
        assert!(s.on_spawn_timer());
        assert_eq!(s.shooting_stars().len(), 1);

        s.rng = ScriptedRandom::new(&[0.7]);
        assert!(!s.on_spawn_timer());
        assert_eq!(s.shooting_stars().len(), 1);
    }

    #[test]
    fn test_removal_iff_past_margin() {
        let mut s = session(Viewport::new(800.0, 600.0));
        // Heading right: 895 + 6 = 901 > 900 leaves, 894 + 6 = 900 stays.
        s.shooting.push(parked(895.0, 6.0));
        s.shooting.push(parked(894.0, 6.0));
        s.frame(16.0, &mut Recorder::default());
        let xs: Vec<f64> = s.shooting_stars().iter().map(|st| st.position.x).collect();
        assert_eq!(xs, vec![900.0]);
    }

    #[test]
    fn test_removed_star_is_still_drawn_on_its_last_frame() {
        let mut s = session(Viewport::new(800.0, 600.0));
        s.shooting.push(parked(950.0, 6.0));
        let mut surface = Recorder::default();
        s.frame(16.0, &mut surface);
        assert!(s.shooting_stars().is_empty());
        assert!(matches!(surface.ops.last(), Some(Op::Line(..))));
    }

    #[test]
    fn test_frame_order_and_star_alpha() {
        let mut s = session(Viewport::new(1200.0, 800.0));
        s.shooting.push(parked(10.0, 6.0));
        let expected: Vec<f64> = s
            .stars()
            .iter()
            .map(|st| {
                let phase = st.phase + st.twinkle_speed * 20.0;
                st.base_alpha * (0.6 + 0.4 * phase.sin())
            })
            .collect();

        let mut surface = Recorder::default();
        s.frame(20.0, &mut surface);

        assert_eq!(surface.ops[0], Op::Clear);
        assert_eq!(surface.ops[1], Op::Rect);
        let circles: Vec<&Op> = surface.ops[2..122].iter().collect();
        assert!(circles.iter().all(|op| matches!(op, Op::Circle(..))));
        for (op, alpha) in circles.iter().zip(&expected) {
            let Op::Circle(_, _, color) = op else {
                unreachable!()
            };
            assert!((color.a - alpha.clamp(0.0, 1.0)).abs() < 1e-12);
        }
        assert_eq!(
            surface.ops[122],
            Op::Line(Point::new(16.0, 0.0), Point::new(-134.0, 0.0))
        );
        assert_eq!(surface.ops.len(), 123);
    }

    #[test]
    fn test_delta_uses_previous_frame_time() {
        let mut s = SkySession::new(SkyParams::default(), fastrand::Rng::with_seed(5), 1000.0);
        s.resize(Viewport::new(100.0, 100.0));
        let phase0 = s.stars()[0].phase;
        let speed = s.stars()[0].twinkle_speed;
        s.frame(1016.0, &mut Recorder::default());
        s.frame(1050.0, &mut Recorder::default());
        assert!((s.stars()[0].phase - (phase0 + speed * 50.0)).abs() < 1e-9);
    }
}
