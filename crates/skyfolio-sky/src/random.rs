//! Source of uniform random draws.

/// Uniform random numbers in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform draw in `[min, min + span)`.
    fn span(&mut self, min: f64, span: f64) -> f64 {
        min + self.next_f64() * span
    }
}

impl RandomSource for fastrand::Rng {
    fn next_f64(&mut self) -> f64 {
        self.f64()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRandom {
    values: Vec<f64>,
    index: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            index: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
