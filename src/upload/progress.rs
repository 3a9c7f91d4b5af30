use std::collections::VecDeque;

pub const COMPLETE: u8 = 100;

/// Supplies the per-tick progress increment. `None` interrupts the upload.
pub trait IncrementSource: Send {
    fn next_increment(&mut self) -> Option<f64>;
}

/// Uniform increments in `[0, max)`.
#[derive(Debug)]
pub struct RandomIncrements {
    rng: fastrand::Rng,
    max: f64,
}

impl RandomIncrements {
    pub fn new(max: f64) -> Self {
        Self {
            rng: fastrand::Rng::new(),
            max,
        }
    }

    pub fn seeded(max: f64, seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            max,
        }
    }
}

impl IncrementSource for RandomIncrements {
    fn next_increment(&mut self) -> Option<f64> {
        Some(self.rng.f64() * self.max)
    }
}

/// Replays a fixed list, then interrupts once it runs dry.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIncrements {
    steps: VecDeque<f64>,
}

impl ScriptedIncrements {
    pub fn new(steps: impl IntoIterator<Item = f64>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }
}

impl IncrementSource for ScriptedIncrements {
    fn next_increment(&mut self) -> Option<f64> {
        self.steps.pop_front()
    }
}

/// Accumulates increments into a percentage that never goes down and
/// stops at 100.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgressCurve {
    accumulated: f64,
}

impl ProgressCurve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, increment: f64) -> u8 {
        if increment.is_finite() && increment > 0.0 {
            self.accumulated = (self.accumulated + increment).min(COMPLETE as f64);
        }
        self.percent()
    }

    /// Rounded percentage; 100 is only reported once complete.
    pub fn percent(&self) -> u8 {
        if self.is_complete() {
            COMPLETE
        } else {
            (self.accumulated.round() as u8).min(COMPLETE - 1)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.accumulated >= COMPLETE as f64
    }

    /// Progress after replaying `increments` from zero, one entry per tick.
    pub fn replay(increments: impl IntoIterator<Item = f64>) -> Vec<u8> {
        let mut curve = Self::new();
        increments.into_iter().map(|i| curve.advance(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_at_one_hundred() {
        let mut curve = ProgressCurve::new();
        assert_eq!(curve.advance(60.0), 60);
        assert!(!curve.is_complete());
        assert_eq!(curve.advance(60.0), 100);
        assert!(curve.is_complete());
        assert_eq!(curve.advance(10.0), 100);
    }

    #[test]
    fn ignores_negative_and_non_finite_increments() {
        assert_eq!(
            ProgressCurve::replay([10.0, -5.0, f64::NAN, f64::INFINITY, 2.4]),
            vec![10, 10, 10, 10, 12]
        );
    }

    #[test]
    fn rounding_never_reports_one_hundred_early() {
        let mut curve = ProgressCurve::new();
        assert_eq!(curve.advance(99.4), 99);
        assert_eq!(curve.advance(0.3), 99);
        assert!(!curve.is_complete());
        assert_eq!(curve.advance(0.5), 100);
    }

    #[test]
    fn random_increments_stay_in_range_and_finish() {
        let mut source = RandomIncrements::seeded(15.0, 42);
        let mut curve = ProgressCurve::new();
        let mut samples = Vec::new();

        for _ in 0..10_000 {
            let step = source.next_increment().unwrap();
            assert!((0.0..15.0).contains(&step));
            samples.push(curve.advance(step));
            if curve.is_complete() {
                break;
            }
        }

        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(samples.last(), Some(&COMPLETE));
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut a = RandomIncrements::seeded(15.0, 7);
        let mut b = RandomIncrements::seeded(15.0, 7);
        for _ in 0..20 {
            assert_eq!(a.next_increment(), b.next_increment());
        }
    }

    #[test]
    fn scripted_source_runs_dry() {
        let mut source = ScriptedIncrements::new([1.0, 2.0]);
        assert_eq!(source.next_increment(), Some(1.0));
        assert_eq!(source.next_increment(), Some(2.0));
        assert_eq!(source.next_increment(), None);
    }
}
