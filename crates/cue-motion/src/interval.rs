//! Duration-bound actions driven by normalized progress.
//!
//! An [`IntervalAction`] describes *what* to interpolate: it captures a
//! starting snapshot in `begin` and writes the state for a progress value
//! `t ∈ [0, 1]` in `update`. The [`Interval`] adapter owns the timing —
//! the canonical step is `elapsed += dt`, `t = min(1, elapsed/duration)`,
//! `update(t)`, done at `t == 1`. A zero duration completes on the very
//! first step evaluation.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::action::{Action, BoxedAction};
use crate::error::{MotionError, Result};
use crate::target::{Attribute, Target};

/// A boxed interval action, as wrapped by [`Interval`] and the modifiers.
pub type BoxedInterval = Box<dyn IntervalAction>;

/// A tween or timing curve with a fixed, non-negative duration.
///
/// Implementors never advance time themselves; they are driven either by an
/// [`Interval`] adapter or by a wrapping modifier that remaps `t`.
pub trait IntervalAction {
    /// Short type name for diagnostics.
    fn name(&self) -> &'static str;

    /// Fixed duration in seconds.
    fn duration(&self) -> f64;

    /// Capture the starting snapshot from the target.
    fn begin(&mut self, target: &mut dyn Target) -> Result<()> {
        let _ = target;
        Ok(())
    }

    /// Write the interpolated state for progress `t` in `[0, 1]`.
    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()>;

    /// Build the inverse interval action, where one is defined.
    fn reversed_interval(&self) -> Result<BoxedInterval> {
        Err(MotionError::NotReversible {
            action: self.name(),
        })
    }

    /// Wrap this interval action in an [`Interval`] and box it for tree
    /// building.
    fn into_action(self) -> BoxedAction
    where
        Self: Sized + 'static,
    {
        Box::new(Interval::new(Box::new(self)))
    }
}

/// Validate a user-supplied duration at construction time.
pub(crate) fn validate_duration(duration: f64) -> Result<f64> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(MotionError::invalid_argument(format!(
            "duration must be finite and non-negative, got {duration}"
        )));
    }
    Ok(duration)
}

/// Elapsed-time bookkeeping shared by all interval actions.
#[derive(Debug, Clone)]
pub struct IntervalClock {
    duration: f64,
    elapsed: f64,
    done: bool,
}

impl IntervalClock {
    /// Create a clock for a validated duration.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            done: false,
        }
    }

    /// Reset elapsed time and completion for a fresh start.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.done = false;
    }

    /// Advance by `dt` seconds and return clamped progress.
    ///
    /// Marks the clock done when progress reaches 1; a zero duration is
    /// done on the first call.
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.elapsed += dt;
        let t = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        if t >= 1.0 {
            self.done = true;
        }
        t
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// Adapter that drives one [`IntervalAction`] through the [`Action`]
/// lifecycle with the canonical interval step.
pub struct Interval {
    inner: BoxedInterval,
    clock: IntervalClock,
    started: bool,
}

impl Interval {
    pub fn new(inner: BoxedInterval) -> Self {
        let duration = inner.duration();
        Self {
            inner,
            clock: IntervalClock::new(duration),
            started: false,
        }
    }
}

impl Action for Interval {
    fn start(&mut self, target: &mut dyn Target) -> Result<()> {
        self.clock.reset();
        self.started = true;
        self.inner.begin(target)
    }

    fn step(&mut self, target: &mut dyn Target, dt: f64) -> Result<()> {
        assert!(
            self.started,
            "step() called before start() on '{}'",
            self.inner.name()
        );
        let t = self.clock.advance(dt);
        self.inner.update(target, t)
    }

    fn done(&self) -> bool {
        self.clock.is_done()
    }

    fn stop(&mut self, _target: &mut dyn Target) {
        self.started = false;
    }

    fn reversed(&self) -> Result<BoxedAction> {
        Ok(Box::new(Self::new(self.inner.reversed_interval()?)))
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// Occupies time without touching the target.
///
/// Exists to space out children inside a `Sequence`. Self-inverse.
#[derive(Debug, Clone)]
pub struct Delay {
    duration: f64,
}

impl Delay {
    pub fn new(duration: f64) -> Result<Self> {
        Ok(Self {
            duration: validate_duration(duration)?,
        })
    }

    /// A delay with a duration sampled uniformly from `[low, high)`,
    /// once, at construction.
    pub fn random(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(MotionError::invalid_argument(format!(
                "random delay bounds must be finite with low <= high, got [{low}, {high})"
            )));
        }
        Self::new(low + (high - low) * random_unit())
    }
}

impl IntervalAction for Delay {
    fn name(&self) -> &'static str {
        "Delay"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn update(&mut self, _target: &mut dyn Target, _t: f64) -> Result<()> {
        Ok(())
    }

    fn reversed_interval(&self) -> Result<BoxedInterval> {
        Ok(Box::new(self.clone()))
    }
}

/// One splitmix64 sample in `[0, 1)`, seeded from the wall clock.
///
/// The simulation core stays free of the `rand` dependency; a single
/// construction-time sample does not need more than this.
fn random_unit() -> f64 {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9e37_79b9_7f4a_7c15);
    let mut z = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> 11) as f64 / (1u64 << 53) as f64
}

/// Linear interpolation of one named numeric attribute.
#[derive(Debug, Clone)]
pub struct Lerp {
    attribute: Attribute,
    from: f64,
    to: f64,
    duration: f64,
}

impl Lerp {
    pub fn new(attribute: Attribute, from: f64, to: f64, duration: f64) -> Result<Self> {
        if !from.is_finite() || !to.is_finite() {
            return Err(MotionError::invalid_argument(
                "lerp endpoints must be finite",
            ));
        }
        Ok(Self {
            attribute,
            from,
            to,
            duration: validate_duration(duration)?,
        })
    }
}

impl IntervalAction for Lerp {
    fn name(&self) -> &'static str {
        "Lerp"
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn update(&mut self, target: &mut dyn Target, t: f64) -> Result<()> {
        target.set_attribute(self.attribute, self.from + (self.to - self.from) * t);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Node;

    #[test]
    fn test_clock_progress_and_completion() {
        let mut clock = IntervalClock::new(2.0);
        assert!(!clock.is_done());

        assert!((clock.advance(0.5) - 0.25).abs() < 1e-9);
        assert!(!clock.is_done());

        assert!((clock.advance(1.5) - 1.0).abs() < 1e-9);
        assert!(clock.is_done());

        // Overshoot clamps to 1.
        assert_eq!(clock.advance(10.0), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_on_first_step() {
        let mut clock = IntervalClock::new(0.0);
        assert!(!clock.is_done());
        assert_eq!(clock.advance(0.0), 1.0);
        assert!(clock.is_done());
    }

    #[test]
    fn test_clock_reset() {
        let mut clock = IntervalClock::new(1.0);
        clock.advance(1.0);
        assert!(clock.is_done());

        clock.reset();
        assert!(!clock.is_done());
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_interval_runs_delay_to_completion() {
        let mut node = Node::default();
        let mut action = Delay::new(1.0).unwrap().into_action();

        action.start(&mut node).unwrap();
        assert!(!action.done());

        action.step(&mut node, 0.5).unwrap();
        assert!(!action.done());

        action.step(&mut node, 0.5).unwrap();
        assert!(action.done());
    }

    #[test]
    fn test_interval_restart_resets_elapsed() {
        let mut node = Node::default();
        let mut action = Delay::new(1.0).unwrap().into_action();

        action.start(&mut node).unwrap();
        action.step(&mut node, 1.0).unwrap();
        assert!(action.done());
        action.stop(&mut node);

        action.start(&mut node).unwrap();
        assert!(!action.done());
        action.step(&mut node, 0.25).unwrap();
        assert!(!action.done());
    }

    #[test]
    #[should_panic(expected = "step() called before start()")]
    fn test_step_before_start_panics() {
        let mut node = Node::default();
        let mut action = Delay::new(1.0).unwrap().into_action();
        let _ = action.step(&mut node, 0.1);
    }

    #[test]
    fn test_duration_validation() {
        assert!(Delay::new(-1.0).is_err());
        assert!(Delay::new(f64::NAN).is_err());
        assert!(Delay::new(f64::INFINITY).is_err());
        assert!(Delay::new(0.0).is_ok());
    }

    #[test]
    fn test_random_delay_bounds() {
        for _ in 0..16 {
            let delay = Delay::random(0.5, 1.5).unwrap();
            assert!(delay.duration() >= 0.5);
            assert!(delay.duration() < 1.5 + 1e-9);
        }

        // Degenerate range is allowed and exact.
        let delay = Delay::random(2.0, 2.0).unwrap();
        assert_eq!(delay.duration(), 2.0);

        assert!(Delay::random(2.0, 1.0).is_err());
        assert!(Delay::random(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_lerp_writes_attribute() {
        let mut node = Node::default();
        let mut action = Lerp::new(Attribute::Scale, 1.0, 3.0, 2.0)
            .unwrap()
            .into_action();

        action.start(&mut node).unwrap();
        action.step(&mut node, 1.0).unwrap();
        assert!((node.scale - 2.0).abs() < 1e-9);

        action.step(&mut node, 1.0).unwrap();
        assert!((node.scale - 3.0).abs() < 1e-9);
        assert!(action.done());
    }

    #[test]
    fn test_lerp_is_not_reversible() {
        let lerp = Lerp::new(Attribute::X, 0.0, 10.0, 1.0).unwrap();
        assert!(lerp.reversed_interval().is_err());
    }

    #[test]
    fn test_delay_reverse_is_self() {
        let delay = Delay::new(1.5).unwrap();
        let reversed = delay.reversed_interval().unwrap();
        assert_eq!(reversed.duration(), 1.5);
    }
}
