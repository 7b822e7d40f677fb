//! Easing curves for page transitions.

/// Shape of an interpolation over normalised time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Fast start, slow end.
    CubicOut,
    /// Slow start and end.
    CubicInOut,
}

impl Easing {
    /// Apply to `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Progress of a transition that starts at `start_ms` and lasts `duration_ms`.
pub fn progress(now_ms: f64, start_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return if now_ms >= start_ms { 1.0 } else { 0.0 };
    }
    ((now_ms - start_ms) / duration_ms).clamp(0.0, 1.0)
}
